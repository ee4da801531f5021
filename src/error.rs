/// Errors raised by the search when its preconditions are violated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("Length mismatch: genome has {genome} characters, target has {target}")]
    LengthMismatch { genome: usize, target: usize },
    #[error("Target string is empty")]
    EmptyTarget,
    #[error("Population size must be at least 1")]
    EmptyPopulation,
    #[error("Alphabet is empty")]
    EmptyAlphabet,
    #[error("Target character {ch:?} lies outside the clamped alphabet range")]
    TargetOutsideAlphabet { ch: char },
}
