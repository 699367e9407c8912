use std::fs;
use std::sync::Arc;

use camino::Utf8PathBuf;
use rstest::{fixture, rstest};
use tempfile::TempDir;

use super::{
    DefaultReader, DirectorySource, I18nError, Placement, SourceErrorPolicy, SourceReader,
    Translator,
};

struct Workspace {
    _dir: TempDir,
    vendor: Utf8PathBuf,
    app: Utf8PathBuf,
}

impl Workspace {
    fn write(&self, root: &Utf8PathBuf, relative: &str, contents: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create translation directory");
        }
        fs::write(path, contents).expect("write translation file");
    }

    fn translator(&self, policy: SourceErrorPolicy) -> Translator {
        let source = DirectorySource::new([self.vendor.clone(), self.app.clone()]);
        let reader = SourceReader::new(source)
            .with_name("files")
            .with_error_policy(policy);
        let translator = Translator::default();
        translator.attach_reader(Arc::new(reader), Placement::First);
        translator.attach_reader(Arc::new(DefaultReader::new()), Placement::Last);
        translator
    }
}

#[fixture]
fn workspace() -> Workspace {
    let dir = TempDir::new().expect("create temporary directory");
    let base = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
        .unwrap_or_else(|path| panic!("non UTF-8 temporary path: {}", path.display()));
    let workspace = Workspace {
        vendor: base.join("vendor"),
        app: base.join("app"),
        _dir: dir,
    };

    workspace.write(&workspace.vendor, "i18n/zh.toml", "Hello = \"你好\"\nBye = \"再见\"\n");
    workspace.write(&workspace.vendor, "i18n/zh/cn.toml", "Hello = \"您好\"\n");
    workspace.write(
        &workspace.app,
        "i18n/zh/cn/guangdong.toml",
        "Bye = \"拜拜\"\n[menu]\nopen = \"打开\"\n",
    );
    workspace.write(&workspace.app, "i18n/zh.toml", "Thanks = \"谢谢\"\n");
    workspace
}

#[rstest]
#[case("Hello", "您好")]
#[case("Bye", "拜拜")]
#[case("Thanks", "谢谢")]
#[case("menu.open", "打开")]
#[case("Unknown", "Unknown")]
fn walks_the_fallback_tree(workspace: Workspace, #[case] key: &str, #[case] expected: &str) {
    let translator = workspace.translator(SourceErrorPolicy::Skip);

    assert_eq!(translator.get(key, Some("zh_CN_guangdong")), expected);
}

#[rstest]
fn less_specific_locales_see_less(workspace: Workspace) {
    let translator = workspace.translator(SourceErrorPolicy::Skip);

    assert_eq!(translator.get("Hello", Some("zh")), "你好");
    assert_eq!(translator.get("Bye", Some("zh-cn")), "再见");
    assert_eq!(translator.get("Hello", Some("fr")), "Hello");
}

#[rstest]
fn broken_files_follow_the_error_policy(workspace: Workspace) {
    workspace.write(&workspace.app, "i18n/zh/cn.toml", "Hello = [\n");

    let lenient = workspace.translator(SourceErrorPolicy::Skip);
    assert_eq!(lenient.get("Hello", Some("zh-cn")), "您好");
    assert_eq!(lenient.get("Bye", Some("zh-cn")), "再见");

    let strict = workspace.translator(SourceErrorPolicy::Propagate);
    assert!(matches!(
        strict.try_get("Hello", Some("zh-cn")),
        Err(I18nError::Source { .. })
    ));
    assert_eq!(strict.get("Hello", Some("zh-cn")), "Hello");
}
