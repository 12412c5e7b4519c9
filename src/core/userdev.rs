//! The userdev descriptor consumed by downstream tooling.
//!
//! The JSON schema is persisted state and must remain stable: top-level
//! fields `spec`, `mcp`, `ats`, `binpatches`, `binpatcher{version,args}`,
//! `patches`, `sources`, `universal`, `libraries[]`, `modules[]`,
//! `testLibraries[]` and `runs{name -> run}`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::version::VersionDescriptor;
use crate::util::config::UserDevLists;

const SPEC_VERSION: u32 = 2;
const BINPATCHER_VERSION: &str = "1.1.1";
const BOOTSTRAP_MAIN: &str = "cpw.mods.bootstraplauncher.BootstrapLauncher";

/// Module-path and reflection-access flags required by the bootstrap
/// launcher; identical for every run kind.
const JVM_ARGS: &[&str] = &[
    "-p",
    "{modules}",
    "--add-modules",
    "ALL-MODULE-PATH",
    "--add-opens",
    "java.base/java.util.jar=cpw.mods.securejarhandler",
    "--add-opens",
    "java.base/java.lang.invoke=cpw.mods.securejarhandler",
    "--add-exports",
    "java.base/sun.security.util=cpw.mods.securejarhandler",
    "--add-exports",
    "jdk.naming.dns/com.sun.jndi.dns=java.naming",
];

/// Serialized userdev descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDevConfig {
    pub spec: u32,
    pub mcp: String,
    pub ats: String,
    pub binpatches: String,
    pub binpatcher: BinpatcherConfig,
    pub patches: String,
    pub sources: String,
    pub universal: String,
    pub libraries: Vec<String>,
    pub modules: Vec<String>,
    #[serde(rename = "testLibraries")]
    pub test_libraries: Vec<String>,
    pub runs: IndexMap<String, RunConfig>,
}

/// Binary patcher tool coordinate and argument template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinpatcherConfig {
    pub version: String,
    pub args: Vec<String>,
}

/// One run launch template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub main: String,
    pub args: Vec<String>,
    #[serde(rename = "jvmArgs")]
    pub jvm_args: Vec<String>,
    pub client: bool,
    pub server: bool,
    #[serde(rename = "dataGenerator")]
    pub data_generator: bool,
    #[serde(rename = "gameTest")]
    pub game_test: bool,
    pub env: IndexMap<String, String>,
    pub props: IndexMap<String, String>,
}

/// The four supported run kinds. Closed enumeration: new kinds are added by
/// extending the traits table, not by branching at call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunKind {
    Client,
    Data,
    GameTestServer,
    Server,
}

/// Per-kind contribution to the launch template.
struct RunTraits {
    json_name: &'static str,
    launch_target: &'static str,
    is_client: bool,
    is_server: bool,
    is_data: bool,
    game_test: bool,
    wants_assets: bool,
}

impl RunKind {
    pub const ALL: [RunKind; 4] = [
        RunKind::Client,
        RunKind::Data,
        RunKind::GameTestServer,
        RunKind::Server,
    ];

    fn traits(self) -> RunTraits {
        match self {
            RunKind::Client => RunTraits {
                json_name: "client",
                launch_target: "forgeclient",
                is_client: true,
                is_server: false,
                is_data: false,
                game_test: true,
                wants_assets: true,
            },
            RunKind::Data => RunTraits {
                json_name: "data",
                launch_target: "forgedata",
                is_client: false,
                is_server: false,
                is_data: true,
                game_test: false,
                wants_assets: true,
            },
            RunKind::GameTestServer => RunTraits {
                json_name: "gameTestServer",
                launch_target: "forgeserver",
                is_client: false,
                is_server: true,
                is_data: false,
                game_test: true,
                wants_assets: false,
            },
            RunKind::Server => RunTraits {
                json_name: "server",
                launch_target: "forgeserver",
                is_client: false,
                is_server: true,
                is_data: false,
                game_test: false,
                wants_assets: false,
            },
        }
    }

    pub fn json_name(self) -> &'static str {
        self.traits().json_name
    }
}

impl UserDevConfig {
    /// Assemble the full descriptor for the given versions and library
    /// lists. `for_neodev` selects the in-repo dev launch targets instead of
    /// the consumer-facing userdev ones.
    pub fn build(versions: &VersionDescriptor, lists: &UserDevLists, for_neodev: bool) -> Self {
        let mut runs = IndexMap::new();
        for kind in RunKind::ALL {
            runs.insert(
                kind.json_name().to_string(),
                build_run(kind, versions, lists, for_neodev),
            );
        }

        UserDevConfig {
            spec: SPEC_VERSION,
            mcp: versions.neoform_artifact_zip(),
            ats: "ats/".to_string(),
            binpatches: "joined.lzma".to_string(),
            binpatcher: BinpatcherConfig {
                version: format!("net.minecraftforge:binarypatcher:{BINPATCHER_VERSION}:fatjar"),
                args: ["--clean", "{clean}", "--output", "{output}", "--apply", "{patch}"]
                    .map(String::from)
                    .to_vec(),
            },
            patches: "patches/".to_string(),
            sources: versions.sources_artifact(),
            universal: versions.universal_artifact(),
            libraries: lists.libraries.clone(),
            modules: lists.modules.clone(),
            test_libraries: lists.test_libraries.clone(),
            runs,
        }
    }

    /// Pretty-printed JSON rendering.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn build_run(
    kind: RunKind,
    versions: &VersionDescriptor,
    lists: &UserDevLists,
    for_neodev: bool,
) -> RunConfig {
    let traits = kind.traits();
    let flavor = if for_neodev { "dev" } else { "userdev" };

    let launch_target = format!("{}{}", traits.launch_target, flavor);
    let mut args: Vec<String> = [
        "--gameDir",
        ".",
        "--launchTarget",
        launch_target.as_str(),
        "--fml.fmlVersion",
        versions.fml.as_str(),
        "--fml.mcVersion",
        versions.minecraft.as_str(),
        "--fml.neoForgeVersion",
        versions.neoforge.as_str(),
        "--fml.neoFormVersion",
        versions.neoform.as_str(),
    ]
    .map(String::from)
    .to_vec();

    if traits.is_client {
        args.extend(["--version".to_string(), versions.neoforge.clone()]);
    }
    if traits.wants_assets {
        args.extend(
            ["--assetIndex", "{asset_index}", "--assetsDir", "{assets_root}"].map(String::from),
        );
    }

    let mut props = IndexMap::new();
    props.insert(
        "java.net.preferIPv6Addresses".to_string(),
        "system".to_string(),
    );
    props.insert("ignoreList".to_string(), lists.ignore.join(","));
    props.insert(
        "legacyClassPath.file".to_string(),
        "{minecraft_classpath_file}".to_string(),
    );
    if traits.game_test {
        props.insert("neoforge.enableGameTest".to_string(), "true".to_string());
    }
    if kind == RunKind::GameTestServer {
        props.insert("neoforge.gameTestServer".to_string(), "true".to_string());
    }

    let mut env = IndexMap::new();
    env.insert("MOD_CLASSES".to_string(), "{source_roots}".to_string());

    RunConfig {
        main: BOOTSTRAP_MAIN.to_string(),
        args,
        jvm_args: JVM_ARGS.iter().map(|s| s.to_string()).collect(),
        client: traits.is_client,
        server: traits.is_server,
        data_generator: traits.is_data,
        game_test: traits.game_test,
        env,
        props,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn versions() -> VersionDescriptor {
        VersionDescriptor {
            minecraft: "1.20.1".into(),
            neoform: "20230612.114412".into(),
            fml: "47.1.0".into(),
            neoforge: "20.1.100".into(),
        }
    }

    fn lists() -> UserDevLists {
        UserDevLists {
            libraries: vec!["net.neoforged.fancymodloader:loader:47.1.0".into()],
            modules: vec!["cpw.mods:securejarhandler:2.1.10".into()],
            test_libraries: vec![],
            ignore: vec!["securejarhandler-2.1.10.jar".into(), "client-extra".into()],
        }
    }

    #[test]
    fn test_run_order_and_names() {
        let config = UserDevConfig::build(&versions(), &lists(), false);
        let names: Vec<_> = config.runs.keys().cloned().collect();
        assert_eq!(names, ["client", "data", "gameTestServer", "server"]);
    }

    #[test]
    fn test_client_run_template() {
        let config = UserDevConfig::build(&versions(), &lists(), false);
        let client = &config.runs["client"];

        assert_eq!(client.main, BOOTSTRAP_MAIN);
        assert!(client.client && !client.server && client.game_test);
        assert_eq!(
            client.props["ignoreList"],
            "securejarhandler-2.1.10.jar,client-extra"
        );
        // The module path placeholder pair must appear literally.
        let pos = client.jvm_args.iter().position(|a| a == "-p").unwrap();
        assert_eq!(client.jvm_args[pos + 1], "{modules}");
        assert!(client.args.contains(&"forgeclientuserdev".to_string()));
        assert!(client.args.contains(&"{asset_index}".to_string()));
    }

    #[test]
    fn test_server_runs() {
        let config = UserDevConfig::build(&versions(), &lists(), true);
        let server = &config.runs["server"];
        let gts = &config.runs["gameTestServer"];

        assert!(server.server && !server.game_test);
        assert!(gts.server && gts.game_test);
        assert_eq!(gts.props["neoforge.gameTestServer"], "true");
        assert!(server.args.contains(&"forgeserverdev".to_string()));
        assert!(!server.args.contains(&"{asset_index}".to_string()));
    }

    #[test]
    fn test_json_field_names() {
        let config = UserDevConfig::build(&versions(), &lists(), false);
        let json = config.to_json().unwrap();

        assert!(json.contains("\"spec\": 2"));
        assert!(json.contains("\"testLibraries\""));
        assert!(json.contains("\"jvmArgs\""));
        assert!(json.contains("\"dataGenerator\""));
        assert!(json.contains("\"gameTest\""));
        assert!(json.contains("\"mcp\": \"net.neoforged:neoform:1.20.1-20230612.114412@zip\""));
        assert!(json.contains("\"binpatches\": \"joined.lzma\""));
    }
}
