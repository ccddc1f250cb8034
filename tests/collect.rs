use std::io::{self, BufRead};
use std::path::Path;
use std::sync::Mutex;

use cgroup_exporter::api::Exposition;
use cgroup_exporter::cgroup::{Collector, Measurement, Registry};
use cgroup_exporter::fsutil::{self, CgroupFs, DirEntry, DirFs};

/// Lays out a small cgroup2 hierarchy below `root`.
fn populate(root: &Path) {
    let write = |path: &str, content: &str| {
        let path = root.join(path);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    };

    write("cgroup.procs", "1\n");
    write(
        "io.stat",
        "7:7 \n254:0 rbytes=4235943936 wbytes=37844828160 rios=95783 wios=3175408 dbytes=0 dios=0\n",
    );
    write(
        "cpu.pressure",
        "some avg10=0.08 avg60=0.03 avg300=0.06 total=7113021\nfull avg10=0.00 avg60=0.00 avg300=0.00 total=0\n",
    );
    write(
        "irq.pressure",
        "full avg10=0.00 avg60=0.00 avg300=0.00 total=1500000\n",
    );
    write("system.slice/memory.current", "8192\n");
    write("system.slice/memory.peak", "16384\n");
    write("system.slice/memory.max", "max\n");
    write("system.slice/memory.high", "1073741824\n");
    write(
        "system.slice/cpu.stat",
        "usage_usec 2500000\nuser_usec 2000000\nsystem_usec 500000\nnr_periods 0\n",
    );
    write("system.slice/sshd.service/pids.current", "3\n");
    write("system.slice/sshd.service/pids.max", "max\n");
    write("system.slice/sshd.service/pids.peak", "5\n");
    write("system.slice/sshd.service/cgroup.procs", "812\n");
    write("user.slice/memory.stat", "anon 4096\nfile 12288\nunknown_key 1\n");
    write("user.slice/memory.events", "low 0\nhigh 2\nmax 0\noom 1\noom_kill 1\n");
    write("user.slice/memory.swap.events", "high 0\nmax 3\nfail 1\n");
}

/// Forwards to a [`DirFs`] and records every opened path.
struct Spy {
    inner: DirFs,
    opened: Mutex<Vec<String>>,
}

impl CgroupFs for Spy {
    fn read_dir(&self, path: &str) -> io::Result<Vec<DirEntry>> {
        self.inner.read_dir(path)
    }

    fn open(&self, path: &str) -> io::Result<Box<dyn BufRead + Send>> {
        self.opened.lock().unwrap().push(path.to_owned());
        self.inner.open(path)
    }
}

fn find<'a>(measurements: &'a [Measurement], name: &str, cgroup: &str) -> Option<&'a Measurement> {
    measurements
        .iter()
        .find(|m| m.name() == name && m.label("cgroup") == Some(cgroup))
}

#[test]
fn test_collect_hierarchy() {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    populate(tmp.path());

    let collector = Collector::new(DirFs::new(tmp.path()), "").unwrap();
    let out = collector.snapshot();

    let value = |name: &str, cgroup: &str| find(&out, name, cgroup).map(Measurement::value);
    assert_eq!(value("cgroup_memory_current_bytes", "system.slice"), Some(8192.0));
    assert_eq!(value("cgroup_memory_max_bytes", "system.slice"), None);
    assert_eq!(value("cgroup_memory_high_bytes", "system.slice"), Some(1073741824.0));
    assert_eq!(value("cgroup_cpu_usage_seconds_total", "system.slice"), Some(2.5));
    assert_eq!(value("cgroup_cpu_periods_total", "system.slice"), Some(0.0));
    assert_eq!(value("cgroup_pids_current", "system.slice/sshd.service"), Some(3.0));
    assert_eq!(value("cgroup_pids_max", "system.slice/sshd.service"), None);
    assert_eq!(value("cgroup_memory_anon_bytes", "user.slice"), Some(4096.0));
    assert_eq!(value("cgroup_memory_file_bytes", "user.slice"), Some(12288.0));
    assert_eq!(value("cgroup_memory_events_oom_kill_total", "user.slice"), Some(1.0));

    // root-level files match the glob themselves and carry the root label
    assert_eq!(value("cgroup_cpu_pressure_waiting_seconds_total", "."), Some(7.113021));
    assert_eq!(value("cgroup_cpu_pressure_stalled_seconds_total", "."), Some(0.0));
    assert_eq!(value("cgroup_irq_pressure_stalled_seconds_total", "."), Some(1.5));

    assert_eq!(value("cgroup_memory_peak_bytes", "system.slice"), Some(16384.0));
    assert_eq!(value("cgroup_pids_peak", "system.slice/sshd.service"), Some(5.0));
    assert_eq!(value("cgroup_memory_swap_events_max_total", "user.slice"), Some(3.0));
    assert_eq!(value("cgroup_memory_swap_events_fail_total", "user.slice"), Some(1.0));

    let io: Vec<_> = out
        .iter()
        .filter(|m| m.name().starts_with("cgroup_io_"))
        .collect();
    assert_eq!(io.len(), 6);
    assert!(io.iter().all(|m| m.label("device") == Some("254:0")));
    assert!(io.iter().all(|m| m.label("cgroup") == Some(".")));
}

#[test]
fn test_collect_only_opens_registered_files() {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    populate(tmp.path());

    let spy = Spy {
        inner: DirFs::new(tmp.path()),
        opened: Mutex::new(Vec::new()),
    };
    let registry = Registry::default();
    let walker = cgroup_exporter::cgroup::Walker::new(&spy, &registry);
    let mut out: Vec<Measurement> = Vec::new();
    for root in cgroup_exporter::cgroup::CgroupGlob::new("")
        .unwrap()
        .expand(&spy)
    {
        walker.walk(&root, &mut out).unwrap();
    }

    let opened = spy.opened.lock().unwrap();
    assert!(!opened.is_empty());
    for path in opened.iter() {
        assert!(
            registry.get(fsutil::basename(path)).is_some(),
            "opened unregistered file `{path}`"
        );
    }
    assert!(!opened.iter().any(|p| p.ends_with("cgroup.procs")));
}

#[test]
fn test_malformed_file_is_isolated() {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    populate(tmp.path());
    std::fs::write(tmp.path().join("user.slice/memory.stat"), "anon 1 2\n").unwrap();
    std::fs::write(tmp.path().join("system.slice/memory.high"), "lots\n").unwrap();

    let out = Collector::new(DirFs::new(tmp.path()), "").unwrap().snapshot();
    assert!(find(&out, "cgroup_memory_anon_bytes", "user.slice").is_none());
    assert!(find(&out, "cgroup_memory_high_bytes", "system.slice").is_none());
    assert!(find(&out, "cgroup_memory_events_oom_total", "user.slice").is_some());
    assert!(find(&out, "cgroup_memory_current_bytes", "system.slice").is_some());
}

#[test]
fn test_collect_is_deterministic() {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    populate(tmp.path());

    let collector = Collector::new(DirFs::new(tmp.path()), "*.slice").unwrap();
    let summary = |out: Vec<Measurement>| -> Vec<(String, Vec<String>, f64)> {
        out.into_iter()
            .map(|m| (m.name().to_owned(), m.labels().to_vec(), m.value()))
            .collect()
    };
    let first = summary(collector.snapshot());
    assert!(!first.is_empty());
    assert!(first.iter().all(|(_, labels, _)| labels.last().unwrap() != "."));
    assert_eq!(first, summary(collector.snapshot()));
}

#[test]
fn test_missing_root_yields_nothing() {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let collector = Collector::new(DirFs::new(tmp.path().join("absent")), "").unwrap();
    assert!(collector.snapshot().is_empty());
}

#[test]
fn test_render_snapshot() {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    populate(tmp.path());

    let mut exposition = Exposition::new();
    for m in Collector::new(DirFs::new(tmp.path()), "user.slice")
        .unwrap()
        .snapshot()
    {
        exposition.record(&m).unwrap();
    }
    let body = exposition.encode().unwrap();
    assert!(body.contains("# TYPE cgroup_memory_events_oom_kill_total counter\n"));
    assert!(body.contains("cgroup_memory_events_high_total{cgroup=\"user.slice\"} 2\n"));
    assert!(body.contains("cgroup_memory_anon_bytes{cgroup=\"user.slice\"} 4096\n"));
    assert!(!body.contains("system.slice"));
}
