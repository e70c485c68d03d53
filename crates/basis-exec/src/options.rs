/// How [`execute`](crate::execute) treats a single invocation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExecOptions {
    allow_fail: bool,
    verbosity: u8,
    simulate: bool,
    quiet: bool,
}

impl ExecOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a non-zero exit status instead of failing.
    pub fn allow_fail(mut self, allow_fail: bool) -> Self {
        self.allow_fail = allow_fail;
        self
    }

    /// Above zero, echo each command line before running it.
    pub fn verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Echo the command line and stop without spawning.
    pub fn simulate(mut self, simulate: bool) -> Self {
        self.simulate = simulate;
        self
    }

    /// Send the child's output to the null device.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn get_allow_fail(&self) -> bool {
        self.allow_fail
    }

    pub fn get_verbosity(&self) -> u8 {
        self.verbosity
    }

    pub fn get_simulate(&self) -> bool {
        self.simulate
    }

    pub fn get_quiet(&self) -> bool {
        self.quiet
    }

    pub(crate) fn echoes(&self) -> bool {
        self.verbosity > 0 || self.simulate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ExecOptions::new();
        assert!(!options.get_allow_fail());
        assert_eq!(options.get_verbosity(), 0);
        assert!(!options.get_simulate());
        assert!(!options.get_quiet());
        assert!(!options.echoes());
    }

    #[test]
    fn test_echoes_when_verbose_or_simulating() {
        assert!(ExecOptions::new().verbosity(1).echoes());
        assert!(ExecOptions::new().simulate(true).echoes());
        assert!(!ExecOptions::new().allow_fail(true).quiet(true).echoes());
    }
}
