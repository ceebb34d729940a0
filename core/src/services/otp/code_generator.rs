//! Passcode generation

use rand::{rngs::OsRng, Rng};

use crate::domain::entities::otp_record::CODE_LENGTH;

const CODE_SPACE: u32 = 1_000_000;

/// Produces fixed-length numeric passcodes from the operating system CSPRNG.
///
/// `gen_range` samples uniformly, so every value in `000000..=999999` is
/// equally likely.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeGenerator;

impl CodeGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(&self) -> String {
        let code: u32 = OsRng.gen_range(0..CODE_SPACE);
        format!("{:0width$}", code, width = CODE_LENGTH)
    }
}
