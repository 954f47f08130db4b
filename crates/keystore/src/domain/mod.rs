//! Pure key-handling logic: key file sealing and local signing. No I/O.

pub mod cipher;
pub mod keyfile;
pub mod signer;
