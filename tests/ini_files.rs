use std::fs;
use std::path::Path;

use configer::{Configer, ErrorKind, IniConfig, ParseOptions};
use rstest::rstest;
use tempfile::TempDir;

fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, contents).expect("write test file");
}

const APP_INI: &str = "\
# global settings
appname = demo
addrs = \"127.0.0.1;192.168.1.1\"

; databases
[MySQL]
# primary
addr = 127.0.0.1
port = 3306
user = \"root\"

[redis]
host=cache.local
";

#[rstest]
fn include_merges_child_sections() {
    let dir = TempDir::new().expect("tempdir");
    let root = dir.path().join("app.ini");
    write_file(&root, "name=root\ninclude \"child.ini\"\n");
    write_file(&dir.path().join("child.ini"), "[x]\ny=1\n");

    let cfg = IniConfig::from_path(&root).unwrap();
    assert_eq!(cfg.string("name"), "root");
    assert_eq!(cfg.int("x::y").unwrap(), 1);
}

#[rstest]
fn include_overwrites_earlier_values_and_later_lines_win() {
    let dir = TempDir::new().expect("tempdir");
    let root = dir.path().join("app.ini");
    write_file(
        &root,
        "[db]\nport=1\nhost=a\ninclude conf.d/db.ini\nhost=c\n",
    );
    write_file(
        &dir.path().join("conf.d/db.ini"),
        "# overridden\n[db]\nport=2\nhost=b\n",
    );

    let cfg = IniConfig::from_path(&root).unwrap();
    assert_eq!(cfg.string("db::port"), "2");
    assert_eq!(cfg.string("db::host"), "c");
    assert_eq!(cfg.section_comment("db").as_deref(), Some(" overridden"));
}

#[rstest]
fn nested_include_resolves_against_its_own_directory() {
    let dir = TempDir::new().expect("tempdir");
    let root = dir.path().join("app.ini");
    write_file(&root, "include \"nested/a.ini\"\n");
    write_file(&dir.path().join("nested/a.ini"), "include \"b.ini\"\na=1\n");
    write_file(&dir.path().join("nested/b.ini"), "b=2\n");

    let cfg = IniConfig::from_path(&root).unwrap();
    assert_eq!(cfg.int("a").unwrap(), 1);
    assert_eq!(cfg.int("b").unwrap(), 2);
}

#[rstest]
fn absolute_include_path() {
    let dir = TempDir::new().expect("tempdir");
    let child = dir.path().join("shared").join("common.ini");
    write_file(&child, "[common]\nlevel=debug\n");
    let root = dir.path().join("app.ini");
    write_file(&root, &format!("include \"{}\"\n", child.display()));

    let cfg = IniConfig::from_path(&root).unwrap();
    assert_eq!(cfg.string("common::level"), "debug");
}

#[rstest]
fn diamond_includes_are_allowed() {
    let dir = TempDir::new().expect("tempdir");
    let root = dir.path().join("app.ini");
    write_file(&root, "include a.ini\ninclude b.ini\n");
    write_file(&dir.path().join("a.ini"), "include shared.ini\n");
    write_file(&dir.path().join("b.ini"), "include shared.ini\n");
    write_file(&dir.path().join("shared.ini"), "k=v\n");

    let cfg = IniConfig::from_path(&root).unwrap();
    assert_eq!(cfg.string("k"), "v");
}

#[rstest]
#[case("self.ini", "include self.ini\n", None)]
#[case("a.ini", "include b.ini\n", Some(("b.ini", "include a.ini\n")))]
fn include_cycles_fail_fast(
    #[case] root_name: &str,
    #[case] root_body: &str,
    #[case] other: Option<(&str, &str)>,
) {
    let dir = TempDir::new().expect("tempdir");
    let root = dir.path().join(root_name);
    write_file(&root, root_body);
    if let Some((name, body)) = other {
        write_file(&dir.path().join(name), body);
    }

    let err = IniConfig::from_path(&root).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Cycle);
}

#[rstest]
fn failing_include_aborts_whole_parse() {
    let dir = TempDir::new().expect("tempdir");
    let root = dir.path().join("app.ini");
    write_file(&root, "a=1\ninclude bad.ini\n");
    write_file(&dir.path().join("bad.ini"), "no equals here\n");

    let err = IniConfig::from_path(&root).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[rstest]
fn missing_file_is_io_error() {
    let dir = TempDir::new().expect("tempdir");
    let err = IniConfig::from_path(dir.path().join("absent.ini")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[rstest]
fn buffer_includes_resolve_against_scratch_dir() {
    let dir = TempDir::new().expect("tempdir");
    write_file(&dir.path().join("child.ini"), "[x]\ny=1\n");
    let options = ParseOptions::new().with_scratch_dir(dir.path());

    let cfg = IniConfig::from_slice_with_options(b"include \"child.ini\"\n", &options).unwrap();
    assert_eq!(cfg.string("x::y"), "1");
}

#[rstest]
fn save_then_reparse_preserves_values() {
    let dir = TempDir::new().expect("tempdir");
    let source = dir.path().join("app.ini");
    let saved = dir.path().join("saved.ini");
    write_file(&source, APP_INI);

    let original = IniConfig::from_path(&source).unwrap();
    original.save_config_file(&saved).unwrap();
    let reloaded = IniConfig::from_path(&saved).unwrap();

    assert_eq!(original.cfg_data(), reloaded.cfg_data());
    assert_eq!(reloaded.string("mysql::user"), "root");
    assert_eq!(
        reloaded.strings("addrs").unwrap(),
        vec!["127.0.0.1", "192.168.1.1"]
    );
    assert_eq!(reloaded.section_comment("mysql").as_deref(), Some(" databases"));
    assert_eq!(reloaded.key_comment("mysql::addr").as_deref(), Some(" primary"));
    assert_eq!(
        reloaded.key_comment("appname").as_deref(),
        Some(" global settings")
    );
}

#[rstest]
fn save_writes_expected_layout() {
    let dir = TempDir::new().expect("tempdir");
    let saved = dir.path().join("saved.ini");
    let cfg: IniConfig = APP_INI.parse().unwrap();
    cfg.set("redis::port", "6379").unwrap();
    cfg.save_config_file(&saved).unwrap();

    let expected = concat!(
        "# global settings\n",
        "appname=demo\n",
        "addrs=127.0.0.1;192.168.1.1\n",
        "# databases\n",
        "[mysql]\n",
        "# primary\n",
        "addr=127.0.0.1\n",
        "port=3306\n",
        "user=root\n",
        "\n",
        "[redis]\n",
        "host=cache.local\n",
        "port=6379\n",
        "\n",
    );
    assert_eq!(fs::read_to_string(&saved).unwrap(), expected);
}

#[rstest]
fn save_overwrites_existing_file() {
    let dir = TempDir::new().expect("tempdir");
    let target = dir.path().join("out.ini");
    write_file(&target, "stale=1\nmore=2\nand=3\n");
    let cfg: IniConfig = "k=v\n".parse().unwrap();
    cfg.save_config_file(&target).unwrap();
    assert_eq!(fs::read_to_string(&target).unwrap(), "k=v\n");
}

#[rstest]
fn bom_prefixed_file() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("bom.ini");
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(b"[s]\nk=v\n");
    fs::write(&path, bytes).unwrap();

    let cfg = IniConfig::from_path(&path).unwrap();
    assert_eq!(cfg.string("s::k"), "v");
}
