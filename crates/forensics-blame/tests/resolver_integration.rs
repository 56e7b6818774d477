//! End-to-end blamer resolution against mock factories

use forensics_blame::mock::{MockBlamerFactory, MockProbe, ProbeLog};
use forensics_blame::{
    BlamerFactory, BlamerRegistry, BlamerResolver, Build, FactoryErrorPolicy, FileLocations,
    FilteredLog, FnFactorySource, FnScmDetector, NullBlamer, ResolverConfig, ScmDescriptor,
    ScmKind, StaticScmDetector, TracingListener,
};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

fn probe_log() -> ProbeLog {
    Arc::new(Mutex::new(Vec::new()))
}

fn git_resolver(registry: BlamerRegistry) -> BlamerResolver {
    BlamerResolver::new(
        Arc::new(registry),
        Arc::new(StaticScmDetector::new(ScmDescriptor::new(ScmKind::Git))),
    )
}

fn probed(probes: &ProbeLog) -> Vec<(String, PathBuf)> {
    probes
        .lock()
        .unwrap()
        .iter()
        .map(|p| (p.factory.clone(), p.directory.clone()))
        .collect()
}

fn resolve_name(resolver: &BlamerResolver, dirs: &[&str]) -> String {
    let log = FilteredLog::new("Blame errors");
    resolver
        .resolve_multi(&Build::new("backend", 12), dirs, &TracingListener, &log)
        .name()
        .to_string()
}

#[test]
fn test_empty_registry_yields_fallback() {
    let resolver = git_resolver(BlamerRegistry::new());
    assert_eq!(resolve_name(&resolver, &["/a"]), NullBlamer::NAME);
    assert_eq!(resolve_name(&resolver, &["/a", "/b", "/c"]), NullBlamer::NAME);
}

#[test]
fn test_second_factory_in_first_directory_wins() {
    let probes = probe_log();
    let mut registry = BlamerRegistry::new();
    registry.register(MockBlamerFactory::new("f1", probes.clone()));
    registry.register(MockBlamerFactory::new("f2", probes.clone()).matching("/a"));

    let name = resolve_name(&git_resolver(registry), &["/a", "/b"]);

    assert_eq!(name, "f2@/a");
    assert_eq!(
        probed(&probes),
        vec![
            ("f1".to_string(), PathBuf::from("/a")),
            ("f2".to_string(), PathBuf::from("/a")),
        ]
    );
}

#[test]
fn test_first_directory_exhausted_before_next() {
    let probes = probe_log();
    let mut registry = BlamerRegistry::new();
    registry.register(MockBlamerFactory::new("f1", probes.clone()).matching("/d2"));
    registry.register(MockBlamerFactory::new("f2", probes.clone()).matching("/d1"));

    let name = resolve_name(&git_resolver(registry), &["/d1", "/d2"]);

    assert_eq!(name, "f2@/d1");
    assert!(probed(&probes).iter().all(|(_, dir)| dir == Path::new("/d1")));
}

#[test]
fn test_no_match_probes_every_pair_in_order() {
    let probes = probe_log();
    let mut registry = BlamerRegistry::new();
    registry.register(MockBlamerFactory::new("f1", probes.clone()));
    registry.register(MockBlamerFactory::new("f2", probes.clone()));

    let name = resolve_name(&git_resolver(registry), &["/a", "/b"]);

    assert_eq!(name, NullBlamer::NAME);
    assert_eq!(
        probed(&probes),
        vec![
            ("f1".to_string(), PathBuf::from("/a")),
            ("f2".to_string(), PathBuf::from("/a")),
            ("f1".to_string(), PathBuf::from("/b")),
            ("f2".to_string(), PathBuf::from("/b")),
        ]
    );
}

#[test]
fn test_repeated_resolution_is_stable() {
    let probes = probe_log();
    let mut registry = BlamerRegistry::new();
    registry.register(MockBlamerFactory::new("f1", probes.clone()).matching("/b"));
    registry.register(MockBlamerFactory::new("f2", probes.clone()).matching("/a"));
    let resolver = git_resolver(registry);

    let names: Vec<String> = (0..5).map(|_| resolve_name(&resolver, &["/a", "/b"])).collect();
    assert!(names.iter().all(|n| n == "f2@/a"));
}

#[test]
fn test_factories_see_detected_scm_per_directory() {
    let probes = probe_log();
    let mut registry = BlamerRegistry::new();
    registry.register(
        MockBlamerFactory::new("svn", probes.clone())
            .supporting(ScmKind::Subversion)
            .matching("/checkout/svn")
            .matching("/checkout/git"),
    );
    let detector = FnScmDetector(|_build: &Build, dir: &Path| {
        if dir.ends_with("svn") {
            ScmDescriptor::new(ScmKind::Subversion)
        } else {
            ScmDescriptor::new(ScmKind::Git)
        }
    });
    let resolver = BlamerResolver::new(Arc::new(registry), Arc::new(detector));
    let log = FilteredLog::new("Blame errors");

    let blamer = resolver.resolve_multi(
        &Build::new("backend", 12),
        ["/checkout/git", "/checkout/svn"],
        &TracingListener,
        &log,
    );

    assert_eq!(blamer.name(), "svn@/checkout/svn");
    let probes = probes.lock().unwrap().clone();
    assert_eq!(
        probes,
        vec![
            MockProbe {
                factory: "svn".to_string(),
                directory: PathBuf::from("/checkout/git"),
                scm: ScmKind::Git,
            },
            MockProbe {
                factory: "svn".to_string(),
                directory: PathBuf::from("/checkout/svn"),
                scm: ScmKind::Subversion,
            },
        ]
    );
    assert_eq!(
        log.info_messages()[0],
        "svn: unsupported source control git"
    );
}

#[test]
fn test_failing_factory_skipped_and_logged() {
    let probes = probe_log();
    let mut registry = BlamerRegistry::new();
    registry.register(MockBlamerFactory::new("broken", probes.clone()).failing_at("/a"));
    registry.register(MockBlamerFactory::new("git", probes.clone()).matching("/a"));
    let resolver = git_resolver(registry);
    let log = FilteredLog::new("Blame errors");

    let blamer = resolver.resolve_single(
        &Build::new("backend", 12),
        Path::new("/a"),
        &TracingListener,
        &log,
    );

    assert_eq!(blamer.name(), "git@/a");
    assert_eq!(log.error_count(), 1);
    assert!(log.error_messages()[1].contains("broken cannot read /a"));
}

#[test]
fn test_failing_factory_aborts_with_policy() {
    let probes = probe_log();
    let mut registry = BlamerRegistry::new();
    registry.register(MockBlamerFactory::new("broken", probes.clone()).failing_at("/a"));
    registry.register(MockBlamerFactory::new("git", probes.clone()).matching("/b"));
    let resolver = git_resolver(registry).with_config(ResolverConfig {
        factory_error_policy: FactoryErrorPolicy::Abort,
        ..ResolverConfig::default()
    });

    assert_eq!(resolve_name(&resolver, &["/a", "/b"]), NullBlamer::NAME);
    assert_eq!(
        probed(&probes),
        vec![("broken".to_string(), PathBuf::from("/a"))]
    );
}

#[test]
fn test_factory_source_swap() {
    let probes = probe_log();
    let mut resolver = git_resolver(BlamerRegistry::new());
    assert_eq!(resolve_name(&resolver, &["/a"]), NullBlamer::NAME);

    let swapped = probes.clone();
    resolver.set_factory_source(Arc::new(FnFactorySource(move || {
        vec![Arc::new(MockBlamerFactory::new("git", swapped.clone()).matching("/a"))
            as Arc<dyn BlamerFactory>]
    })));

    assert_eq!(resolve_name(&resolver, &["/a"]), "git@/a");
    assert_eq!(probed(&probes).len(), 1);
}

#[test]
fn test_selected_blamer_blames_requested_lines() {
    let probes = probe_log();
    let mut registry = BlamerRegistry::new();
    registry.register(MockBlamerFactory::new("git", probes).matching("/ws"));
    let resolver = git_resolver(registry);
    let log = FilteredLog::new("Blame errors");

    let blamer = resolver.resolve_single(
        &Build::new("backend", 12),
        Path::new("/ws"),
        &TracingListener,
        &log,
    );
    let mut locations = FileLocations::new("/ws");
    locations.add_line("src/lib.rs", 10);
    locations.add_line("src/lib.rs", 20);

    let blames = blamer.blame(&locations, &log);
    let file = blames.get("src/lib.rs").expect("file should be blamed");
    assert_eq!(file.lines().collect::<Vec<_>>(), vec![10, 20]);
    assert_eq!(file.commit(10), "0000000");
    assert_eq!(file.name(20), "mock");
}

#[test]
fn test_fallback_blames_nothing() {
    let resolver = git_resolver(BlamerRegistry::new());
    let log = FilteredLog::new("Blame errors");
    let blamer = resolver.resolve_single(
        &Build::new("backend", 12),
        Path::new("/ws"),
        &TracingListener,
        &log,
    );
    let info_before = log.info_messages();

    let mut locations = FileLocations::new("/ws");
    locations.add_line("src/lib.rs", 1);

    assert!(blamer.blame(&locations, &log).is_empty());
    assert_eq!(log.info_messages(), info_before);
    assert!(!log.has_errors());
}
