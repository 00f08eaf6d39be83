//! CSV input/output.

pub mod adv;
pub mod export;
pub mod leads;
