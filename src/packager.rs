use crate::archive::ArchiveManifest;
use crate::config::Config;
use crate::context::Context;
use crate::request::BuildRequest;
use crate::result::Result;
use crate::toolchain::BuildPlan;
use std::path::{Path, PathBuf};

/// Builds one request with zig and packages the result for the ladder
pub struct Packager<'a> {
    ctx: &'a Context,
    config: &'a Config,
    request: &'a BuildRequest,
    plan: BuildPlan,
    assets_dir: PathBuf,
    archive_path: PathBuf,
}

impl<'a> Packager<'a> {
    pub fn new(ctx: &'a Context, config: &'a Config, request: &'a BuildRequest) -> Self {
        let tpl = config.template(request);
        let plan = BuildPlan::new(ctx, config, request, &tpl);
        let assets_dir = config.assets_dir(ctx, &tpl);
        let archive_path = config.archive_path(ctx, &tpl);

        Self {
            ctx,
            config,
            request,
            plan,
            assets_dir,
            archive_path,
        }
    }

    pub fn plan(&self) -> &BuildPlan {
        &self.plan
    }

    pub fn archive_path(&self) -> &Path {
        &self.archive_path
    }

    /// Run the zig build; a failed build stops here and no archive is touched
    pub fn build(&self) -> Result<()> {
        self.plan.run(self.ctx)
    }

    /// Zip the assets directory and the binary renamed to the bot name
    pub fn package(&self) -> Result<ArchiveManifest> {
        let manifest = ArchiveManifest::collect(
            &self.assets_dir,
            &self.plan.binary_path,
            self.request.name(),
        )?;
        manifest.write(self.ctx, &self.archive_path)?;
        Ok(manifest)
    }

    pub fn target(&self) -> &str {
        &self.config.target
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::fs::{self, File};
    use std::io::Read;
    use tempfile::TempDir;
    use zip::ZipArchive;

    // Stand-in for `zig build`: writes the binary zig would produce
    const FAKE_BUILD: &str = r#"
mkdir -p zig-out/bin
name=zig-bot
for arg in "$@"; do
    case "$arg" in
        -Dexample=*) name="${arg#-Dexample=}" ;;
    esac
done
printf 'bot:%s' "$name" > "zig-out/bin/$name"
"#;

    fn project(build_script: &str) -> (TempDir, Context, Config) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("build"), build_script).unwrap();
        let assets = dir.path().join("ladder_build");
        fs::create_dir_all(&assets).unwrap();
        fs::write(assets.join("LadderBots.json"), b"{}").unwrap();
        fs::write(assets.join("run.sh"), b"./bot").unwrap();

        let ctx = Context::new(dir.path().to_path_buf(), false);
        let config = Config::parse("[ladder]\nzig = \"sh\"\n").unwrap();
        (dir, ctx, config)
    }

    fn zip_entry(path: &Path, name: &str) -> Vec<u8> {
        let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
        let mut buf = Vec::new();
        archive.by_name(name).unwrap().read_to_end(&mut buf).unwrap();
        buf
    }

    #[test]
    fn test_build_and_package_own_bot() {
        let (dir, ctx, config) = project(FAKE_BUILD);
        let request = BuildRequest::new("MyBot", None).unwrap();
        let packager = Packager::new(&ctx, &config, &request);

        packager.build().unwrap();
        let manifest = packager.package().unwrap();

        assert_eq!(manifest.entry_names(), vec!["LadderBots.json", "run.sh", "MyBot"]);
        assert_eq!(packager.archive_path(), dir.path().join("MyBot.zip").as_path());
        assert_eq!(zip_entry(packager.archive_path(), "MyBot"), b"bot:zig-bot");
        assert_eq!(packager.target(), "x86_64-linux");
    }

    #[test]
    fn test_build_and_package_example() {
        let (dir, ctx, config) = project(FAKE_BUILD);
        let request = BuildRequest::new("Reaper", Some("mass_reaper")).unwrap();
        let packager = Packager::new(&ctx, &config, &request);

        packager.build().unwrap();
        packager.package().unwrap();

        let zip_path = dir.path().join("Reaper.zip");
        assert_eq!(zip_entry(&zip_path, "Reaper"), b"bot:mass_reaper");
        assert!(!dir.path().join("zig-out/bin/zig-bot").exists());
    }

    #[test]
    fn test_failed_build_produces_no_archive() {
        let (dir, ctx, config) = project("echo 'error: FileNotFound' >&2\nexit 1\n");
        let request = BuildRequest::new("MyBot", None).unwrap();
        let packager = Packager::new(&ctx, &config, &request);

        let err = packager.build().unwrap_err();
        assert!(matches!(err, Error::CommandFailed(_)));
        assert!(!dir.path().join("MyBot.zip").exists());
    }

    #[test]
    fn test_package_without_binary() {
        let (dir, ctx, config) = project(FAKE_BUILD);
        let request = BuildRequest::new("MyBot", None).unwrap();
        let packager = Packager::new(&ctx, &config, &request);

        let err = packager.package().unwrap_err();
        assert!(matches!(err, Error::BinaryNotFound(_)));
        assert!(!dir.path().join("MyBot.zip").exists());
    }
}
