use ::stridemat_tasks::{Settings, YamlRead, run_script};
use ::stridemat_assert_close::assert_close;
use ::pretty_assertions::assert_eq;
use ::std::fs::File;

fn run_resource(name: &str) -> Vec<String>
{
    let path = format!("{}/tests/resources/{}", env!("CARGO_MANIFEST_DIR"), name);
    let settings = Settings::from_reader(File::open(path).unwrap()).unwrap();
    run_script(&settings).unwrap()
}

#[test]
fn sample_script() {
    let out = run_resource("sample.yaml");
    assert_eq!(out.len(), 10);

    assert_close!(rel=1e-12, out[0].parse::<f64>().unwrap(), 54.0);
    // inverse of [[3, -2], [2, 3]] is [[3, 2], [-2, 3]] / 13
    assert_eq!(out[1], "+0.231, +0.154,\n-0.154, +0.231,");
    assert_eq!(out[3], "0.538, 0.308");
    assert_eq!(out[4], "[3.0, 2.0, -2.0, 3.0]");

    assert_eq!(out[5], "1.000, 3.000, 5.000");
    assert_eq!(out[6], "4.000, 6.000");
    assert_eq!(out[7], "7.000");
    assert_eq!(out[8], "+1, +3,\n+4, +6,");
    assert_eq!(out[9], out[8]);
}
