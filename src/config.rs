#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Run,
    Disasm,
    Debug,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub mode: Mode,
    pub image_path: String,
    pub trace: bool,
}

impl Config {
    /// Parses `[program_name, "run"|"disasm"|"debug", image_path]`,
    /// following the teacher's own manual-parse `Config::with`. `TRACE`
    /// tracing is read from the environment by the caller, not from argv
    /// (spec §6).
    pub fn with(args: &[String]) -> Result<Self, &'static str> {
        if args.len() < 3 {
            return Err("usage: synacor-vm <run|disasm|debug> <image>");
        }

        let mode = match args[1].as_str() {
            "run" => Mode::Run,
            "disasm" => Mode::Disasm,
            "debug" => Mode::Debug,
            _ => return Err("unknown subcommand, expected run|disasm|debug"),
        };

        Ok(Self {
            mode,
            image_path: args[2].clone(),
            trace: false,
        })
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_run_subcommand() {
        let args = ["synacor-vm", "run", "challenge.bin"]
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>();

        let config = Config::with(&args).unwrap();
        assert_eq!(config.mode, Mode::Run);
        assert_eq!(config.image_path, "challenge.bin");
        assert_eq!(config.trace, false);
    }

    #[test]
    fn parses_disasm_subcommand() {
        let args = ["synacor-vm", "disasm", "challenge.bin"]
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>();

        assert_eq!(Config::with(&args).unwrap().mode, Mode::Disasm);
    }

    #[test]
    fn rejects_missing_arguments() {
        let args = ["synacor-vm", "run"].iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert!(Config::with(&args).is_err());
    }

    #[test]
    fn rejects_unknown_subcommand() {
        let args = ["synacor-vm", "frobnicate", "challenge.bin"]
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>();
        assert!(Config::with(&args).is_err());
    }

    #[test]
    fn with_trace_sets_flag() {
        let args = ["synacor-vm", "run", "challenge.bin"]
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>();
        let config = Config::with(&args).unwrap().with_trace(true);
        assert_eq!(config.trace, true);
    }
}
