use std::path::PathBuf;

use world_builder::{resolve_config, resolve_editor, FALLBACK_EDITOR};

#[test]
fn resolve_config_prefers_explicit_dir() {
    let config = resolve_config(Some("/tmp/my-world")).expect("resolve");
    assert_eq!(config.data_dir, PathBuf::from("/tmp/my-world"));
}

#[test]
fn resolve_editor_prefers_editor_then_visual() {
    assert_eq!(resolve_editor(Some("vim".into()), Some("code".into())), "vim");
    assert_eq!(resolve_editor(None, Some("code --wait".into())), "code --wait");
    assert_eq!(resolve_editor(Some("  ".into()), None), FALLBACK_EDITOR);
    assert_eq!(resolve_editor(None, None), "nano");
}
