use crate::cmd;
use crate::config::Config;
use crate::context::Context;
use crate::request::BuildRequest;
use crate::result::Result;
use crate::tpl::Tpl;
use std::path::PathBuf;

/// The zig build invocation for one request and the binary it should produce
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPlan {
    pub program: String,
    pub args: Vec<String>,
    pub binary_name: String,
    pub binary_path: PathBuf,
}

impl BuildPlan {
    pub fn new(ctx: &Context, config: &Config, request: &BuildRequest, tpl: &Tpl) -> Self {
        let mut args = vec![
            "build".to_string(),
            format!("-Dtarget={}", config.target),
            format!("-Doptimize={}", config.optimize),
        ];
        if let Some(example) = request.example() {
            args.push(format!("-Dexample={}", example));
        }
        args.extend(tpl.parse_vec(&config.build_args));

        let binary_name = config.binary_name(request);
        let binary_path = config.bin_dir(ctx, tpl).join(&binary_name);

        Self {
            program: tpl.parse(&config.zig),
            args,
            binary_name,
            binary_path,
        }
    }

    /// Run the build and wait for it; fails on a non-zero exit
    pub fn run(&self, ctx: &Context) -> Result<()> {
        cmd::execute(ctx, &self.program, &self.args)
    }

    pub fn command_line(&self) -> String {
        cmd::command_line(&self.program, &self.args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan_for(example: Option<&str>, config: &Config) -> BuildPlan {
        let ctx = Context::new(PathBuf::from("/proj"), false);
        let request = BuildRequest::new("MyBot", example).unwrap();
        let tpl = config.template(&request);
        BuildPlan::new(&ctx, config, &request, &tpl)
    }

    #[test]
    fn test_own_bot() {
        let plan = plan_for(None, &Config::default());
        assert_eq!(
            plan.command_line(),
            "zig build -Dtarget=x86_64-linux -Doptimize=ReleaseSafe"
        );
        assert!(!plan.args.iter().any(|a| a.starts_with("-Dexample")));
        assert_eq!(plan.binary_name, "zig-bot");
        assert_eq!(plan.binary_path, PathBuf::from("/proj/zig-out/bin/zig-bot"));
    }

    #[test]
    fn test_example_bot() {
        let plan = plan_for(Some("mass_reaper"), &Config::default());
        assert_eq!(
            plan.args,
            vec![
                "build",
                "-Dtarget=x86_64-linux",
                "-Doptimize=ReleaseSafe",
                "-Dexample=mass_reaper",
            ]
        );
        assert_eq!(plan.binary_name, "mass_reaper");
        assert_eq!(plan.binary_path, PathBuf::from("/proj/zig-out/bin/mass_reaper"));
    }

    #[test]
    fn test_configured_toolchain() {
        let config = Config::parse(
            r#"
            [ladder]
            zig = "/opt/zig/zig"
            optimize = "ReleaseFast"
            build-args = ["-Dbot-name=$NAME"]
            bin-dir = "out/$TARGET"
            "#,
        )
        .unwrap();
        let plan = plan_for(None, &config);

        assert_eq!(plan.program, "/opt/zig/zig");
        assert_eq!(
            plan.args,
            vec![
                "build",
                "-Dtarget=x86_64-linux",
                "-Doptimize=ReleaseFast",
                "-Dbot-name=MyBot",
            ]
        );
        assert_eq!(plan.binary_path, PathBuf::from("/proj/out/x86_64-linux/zig-bot"));
    }
}
