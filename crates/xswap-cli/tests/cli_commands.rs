use std::fs;
use std::path::Path;
use std::process::Command;

fn xswap(args: &[&str]) {
    let status = Command::new(env!("CARGO_BIN_EXE_xswap"))
        .args(args)
        .env("RUST_LOG", "warn")
        .status()
        .expect("spawn xswap");
    assert!(status.success(), "xswap {args:?} failed");
}

fn path(p: &Path) -> &str {
    p.to_str().expect("utf-8 path")
}

#[test]
fn map_then_permute_then_prior() {
    let dir = tempfile::tempdir().unwrap();
    let raw = dir.path().join("raw.csv");
    fs::write(&raw, "a,b\nb,c\nc,d\nd,e\ne,a\n").unwrap();

    let mapped = dir.path().join("mapped");
    xswap(&["map", "--edges", path(&raw), "--out", path(&mapped)]);
    let edges_csv = mapped.join("edges.csv");
    assert_eq!(
        fs::read_to_string(&edges_csv).unwrap(),
        "0,1\n1,2\n2,3\n3,4\n4,0\n"
    );
    assert!(fs::read_to_string(mapped.join("source_mapping.csv"))
        .unwrap()
        .starts_with("original,mapped\na,0\n"));

    let permuted = dir.path().join("permuted");
    xswap(&[
        "permute",
        "--edges",
        path(&edges_csv),
        "--seed",
        "4",
        "--out",
        path(&permuted),
    ]);
    let stats: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(permuted.join("stats.json")).unwrap()).unwrap();
    assert_eq!(stats["swap_attempts"], 50);
    assert_eq!(
        fs::read_to_string(permuted.join("edges.csv"))
            .unwrap()
            .lines()
            .count(),
        5
    );
    assert!(permuted.join("manifest.json").exists());

    let config = dir.path().join("prior.yaml");
    fs::write(&config, "n_permutations: 5\nshape: [5, 5]\n").unwrap();
    let priors = dir.path().join("priors");
    xswap(&[
        "prior",
        "--edges",
        path(&edges_csv),
        "--config",
        path(&config),
        "--out",
        path(&priors),
    ]);
    let table = fs::read_to_string(priors.join("priors.csv")).unwrap();
    let mut lines = table.lines();
    assert_eq!(
        lines.next(),
        Some("source_id,target_id,edge,source_degree,target_degree,xswap_prior")
    );
    assert_eq!(lines.count(), 25);
}
