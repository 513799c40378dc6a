//! Shared runtime helpers for the mailing list binaries.

pub mod utils {
    pub mod logging;
}
