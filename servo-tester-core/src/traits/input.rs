//! Mode switch input trait

/// Digital input carrying the Center/Manual switch
pub trait SwitchInput {
    /// Sample the pin level (true = logic high)
    fn is_high(&mut self) -> bool;
}

/// Fixed-level input, handy for benches and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedLevel(pub bool);

impl SwitchInput for FixedLevel {
    fn is_high(&mut self) -> bool {
        self.0
    }
}
