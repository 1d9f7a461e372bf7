/// Logical simulation time, counted in ticks.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    time: u64,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> u64 {
        self.time
    }

    pub fn tick(&mut self) {
        self.time += 1;
    }
}
