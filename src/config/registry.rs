//! The shared option table.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock};

use super::parser::parse_file;
use super::value::{OptionKind, OptionValue, TypedValue};

/// Directory option files are conventionally kept in.
pub const CONFIG_PATH: &str = "configs/";

/// Suffix of the distributed defaults file loaded by [`ConfigRegistry::load_app_configs`].
pub const DIST_SUFFIX: &str = ".dist";

type OptionTable = HashMap<String, String>;

/// Process-wide table of option name to raw value.
///
/// Construct one at startup and share it by reference (or `Arc`). Every
/// access to the table, reads included, goes through one lock.
#[derive(Debug, Default)]
pub struct ConfigRegistry {
    options: Mutex<OptionTable>,
    filename: RwLock<String>,
}

impl ConfigRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the primary option file used by [`Self::load_app_configs`].
    pub fn configure(&self, filename: impl Into<String>) {
        *self.filename.write().unwrap_or_else(PoisonError::into_inner) = filename.into();
    }

    pub fn filename(&self) -> String {
        self.filename.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn config_path(&self) -> &'static str {
        CONFIG_PATH
    }

    /// Discard the current table and load `path` as its sole source.
    pub fn load_initial(&self, path: impl AsRef<Path>) -> bool {
        let mut table = self.lock();
        table.clear();
        load_file(&mut table, path.as_ref())
    }

    /// Layer `path` on top of what is already loaded.
    pub fn load_additional_file(&self, path: impl AsRef<Path>) -> bool {
        let mut table = self.lock();
        load_file(&mut table, path.as_ref())
    }

    /// Initial load of `<filename>.dist`.
    ///
    /// Only the dist file is read; the configured file itself is not layered on top.
    pub fn load_app_configs(&self) -> bool {
        let dist = format!("{}{}", self.filename(), DIST_SUFFIX);
        self.load_initial(dist)
    }

    /// Insert `value` under `name`. An existing entry is overwritten only when
    /// `replace` is set; otherwise it is kept and the clash is logged.
    pub fn add_key(&self, name: &str, value: &str, replace: bool) {
        let mut table = self.lock();
        add_key(&mut table, name.to_string(), value.to_string(), replace);
    }

    /// Typed lookup falling back to `default`.
    ///
    /// A missing name or an unconvertible value yields `default`, logged
    /// unless `show_logs` is false.
    pub fn get_option<T: OptionValue>(&self, name: &str, default: T, show_logs: bool) -> T {
        let Some(raw) = self.get_raw_logged(name, || default.to_option_string(), show_logs) else {
            return default;
        };

        match T::from_option_str(&raw) {
            Some(value) => value,
            None => {
                if show_logs {
                    log_bad_value(name, &default.display_default());
                }
                default
            }
        }
    }

    /// [`Self::get_option`] for a type chosen at runtime.
    pub fn get_typed(
        &self,
        name: &str,
        kind: OptionKind,
        default: TypedValue,
        show_logs: bool,
    ) -> TypedValue {
        let Some(raw) = self.get_raw_logged(name, || default_file_text(&default), show_logs) else {
            return default;
        };

        match kind.parse(&raw) {
            Some(value) => value,
            None => {
                if show_logs {
                    log_bad_value(name, &default.to_string());
                }
                default
            }
        }
    }

    /// Raw text of `name`, without conversion or logging.
    pub fn get_raw(&self, name: &str) -> Option<String> {
        self.lock().get(name).cloned()
    }

    /// Every loaded option name starting with `prefix`, in no particular order.
    pub fn get_keys_by_string(&self, prefix: &str) -> Vec<String> {
        self.lock().keys().filter(|name| name.starts_with(prefix)).cloned().collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lock().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Sorted copy of the whole table.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.lock().iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    fn get_raw_logged(
        &self,
        name: &str,
        default_text: impl FnOnce() -> String,
        show_logs: bool,
    ) -> Option<String> {
        let raw = self.get_raw(name);
        if raw.is_none() && show_logs {
            tracing::error!(
                "> Config: missing name {} in config, add \"{} = {}\"",
                name,
                name,
                default_text()
            );
        }
        raw
    }

    fn lock(&self) -> MutexGuard<'_, OptionTable> {
        self.options.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Parse `path` and merge it into `table`. A file that fails to parse
/// leaves the table untouched.
fn load_file(table: &mut OptionTable, path: &Path) -> bool {
    match parse_file(path) {
        Ok(entries) => {
            let count = entries.len();
            for (name, value) in entries {
                add_key(table, name, value, true);
            }
            tracing::debug!("> Config: loaded {} options from '{}'", count, path.display());
            true
        }
        Err(e) => {
            tracing::error!("> Config: {}: {}", path.display(), e);
            false
        }
    }
}

fn add_key(table: &mut OptionTable, name: String, value: String, replace: bool) {
    if let Some(existing) = table.get(&name) {
        if !replace {
            tracing::error!(
                "> Config: option '{}' already exists with value '{}'",
                name,
                existing
            );
            return;
        }
    }
    table.insert(name, value);
}

fn log_bad_value(name: &str, default: &str) {
    tracing::error!(
        "> Config: bad value defined for name '{}', going to use '{}' instead",
        name,
        default
    );
}

fn default_file_text(default: &TypedValue) -> String {
    match default {
        TypedValue::Bool(b) => b.to_option_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::testing::capture_logs;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::thread;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).expect("write option file");
        path
    }

    #[test]
    fn example_file_loads_and_converts() {
        let tmp = TempDir::new().expect("tmp");
        let path = write_file(
            &tmp,
            "worldserver.conf",
            "# comment\n[Section]\nPort = 8085\nName = \"MyServer\"   # trailing comment\nPort = 9000\n",
        );

        let registry = ConfigRegistry::new();
        assert!(registry.load_initial(&path));

        let expected: BTreeMap<String, String> = [("Name", "MyServer"), ("Port", "8085")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(registry.snapshot(), expected);
        assert_eq!(registry.get_option::<u16>("Port", 0, true), 8085);
        assert_eq!(registry.get_option("Name", String::new(), true), "MyServer");
    }

    #[test]
    fn show_logs_controls_lookup_diagnostics() {
        let registry = ConfigRegistry::new();
        registry.add_key("Rate", "fast", true);

        let (_, logs) = capture_logs(|| registry.get_option::<i32>("Absent", 7, true));
        assert!(logs.contains("missing name Absent in config, add \"Absent = 7\""), "{logs}");

        let (_, logs) = capture_logs(|| registry.get_option("Rate", false, true));
        assert!(logs.contains("bad value defined for name 'Rate', going to use 'false'"), "{logs}");

        let (_, logs) = capture_logs(|| registry.get_option::<f32>("Rate", 1.0, false));
        assert!(logs.is_empty(), "{logs}");
    }

    #[test]
    fn missing_and_bad_values_fall_back_to_default() {
        let tmp = TempDir::new().expect("tmp");
        let path = write_file(&tmp, "a.conf", "Rate = fast\nSmall = 300\n");

        let registry = ConfigRegistry::new();
        assert!(registry.load_initial(&path));
        assert_eq!(registry.get_option::<i32>("missing", 7, true), 7);
        assert_eq!(registry.get_option::<i32>("missing", 7, false), 7);
        assert_eq!(registry.get_option::<f32>("Rate", 1.5, true), 1.5);
        assert_eq!(registry.get_option::<u8>("Small", 9, false), 9);
        assert_eq!(registry.get_option::<u16>("Small", 9, false), 300);
    }

    #[test]
    fn bool_options() {
        let tmp = TempDir::new().expect("tmp");
        let path = write_file(&tmp, "flags.conf", "On = 1\nBroken = notabool\nWord = true\n");

        let registry = ConfigRegistry::new();
        assert!(registry.load_initial(&path));
        assert!(registry.get_option("On", false, true));
        assert!(!registry.get_option("Broken", false, true));
        assert!(registry.get_option("Broken", true, true));
        assert!(registry.get_option("Word", false, true));
        assert!(registry.get_option("Absent", true, false));
    }

    #[test]
    fn string_values_are_returned_verbatim() {
        let tmp = TempDir::new().expect("tmp");
        let path = write_file(&tmp, "s.conf", "Motd = Welcome to   the realm\n");

        let registry = ConfigRegistry::new();
        assert!(registry.load_initial(&path));
        assert_eq!(
            registry.get_option("Motd", "default".to_string(), true),
            "Welcome to   the realm"
        );
    }

    #[test]
    fn later_file_overrides_earlier() {
        let tmp = TempDir::new().expect("tmp");
        let a = write_file(&tmp, "a.conf", "k = from_a\nonly_a = 1\n");
        let b = write_file(&tmp, "b.conf", "k = from_b\n");

        let registry = ConfigRegistry::new();
        assert!(registry.load_initial(&a));
        assert!(registry.load_additional_file(&b));
        assert_eq!(registry.get_raw("k").as_deref(), Some("from_b"));
        assert_eq!(registry.get_raw("only_a").as_deref(), Some("1"));
    }

    #[test]
    fn initial_load_discards_previous_table() {
        let tmp = TempDir::new().expect("tmp");
        let a = write_file(&tmp, "a.conf", "old = 1\n");
        let b = write_file(&tmp, "b.conf", "new = 2\n");

        let registry = ConfigRegistry::new();
        assert!(registry.load_initial(&a));
        assert!(registry.load_initial(&b));
        assert!(!registry.contains("old"));
        assert!(registry.contains("new"));
    }

    #[test]
    fn failed_additional_load_leaves_table_unchanged() {
        let tmp = TempDir::new().expect("tmp");
        let a = write_file(&tmp, "a.conf", "k = 1\n");
        let empty = write_file(&tmp, "empty.conf", "# nothing\n");

        let registry = ConfigRegistry::new();
        assert!(registry.load_initial(&a));
        let before = registry.snapshot();

        assert!(!registry.load_additional_file(&empty));
        assert!(!registry.load_additional_file(tmp.path().join("absent.conf")));
        assert_eq!(registry.snapshot(), before);
    }

    #[test]
    fn failed_initial_load_leaves_table_empty() {
        let tmp = TempDir::new().expect("tmp");
        let a = write_file(&tmp, "a.conf", "k = 1\n");
        let empty = write_file(&tmp, "empty.conf", "\n\n");

        let registry = ConfigRegistry::new();
        assert!(registry.load_initial(&a));
        assert!(!registry.load_initial(&empty));
        assert!(registry.is_empty());
    }

    #[test]
    fn add_key_without_replace_keeps_existing() {
        let registry = ConfigRegistry::new();
        registry.add_key("Realm", "first", true);
        let ((), logs) = capture_logs(|| registry.add_key("Realm", "second", false));
        assert_eq!(registry.get_raw("Realm").as_deref(), Some("first"));
        assert!(logs.contains("option 'Realm' already exists with value 'first'"), "{logs}");

        registry.add_key("Realm", "third", true);
        assert_eq!(registry.get_raw("Realm").as_deref(), Some("third"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn keys_by_prefix() {
        let tmp = TempDir::new().expect("tmp");
        let path = write_file(
            &tmp,
            "log.conf",
            "Log.Level = 3\nLog.File = server.log\nLogger.root = 1\nPort = 1\n",
        );

        let registry = ConfigRegistry::new();
        assert!(registry.load_initial(&path));

        let mut keys = registry.get_keys_by_string("Log.");
        keys.sort();
        assert_eq!(keys, vec!["Log.File".to_string(), "Log.Level".to_string()]);
        assert!(registry.get_keys_by_string("Nope.").is_empty());
        assert_eq!(registry.get_keys_by_string("").len(), 4);
    }

    #[test]
    fn app_configs_load_only_dist_file() {
        let tmp = TempDir::new().expect("tmp");
        let primary = tmp.path().join("authserver.conf");
        write_file(&tmp, "authserver.conf.dist", "Source = dist\nDistOnly = 1\n");
        write_file(&tmp, "authserver.conf", "Source = local\n");

        let registry = ConfigRegistry::new();
        registry.configure(primary.to_string_lossy());
        assert_eq!(registry.filename(), primary.to_string_lossy());
        assert!(registry.load_app_configs());
        assert_eq!(registry.get_raw("Source").as_deref(), Some("dist"));
        assert!(registry.contains("DistOnly"));
    }

    #[test]
    fn app_configs_fail_without_dist_file() {
        let tmp = TempDir::new().expect("tmp");
        write_file(&tmp, "worldserver.conf", "Port = 1\n");

        let registry = ConfigRegistry::new();
        registry.configure(tmp.path().join("worldserver.conf").to_string_lossy());
        assert!(!registry.load_app_configs());
        assert!(registry.is_empty());
    }

    #[test]
    fn config_path_is_constant() {
        assert_eq!(ConfigRegistry::new().config_path(), "configs/");
    }

    #[test]
    fn typed_lookup_by_kind() {
        let registry = ConfigRegistry::new();
        registry.add_key("Port", "8085", true);
        registry.add_key("Flag", "maybe", true);

        assert_eq!(
            registry.get_typed("Port", OptionKind::U16, TypedValue::U16(1), false),
            TypedValue::U16(8085)
        );
        assert_eq!(
            registry.get_typed("Flag", OptionKind::Bool, TypedValue::Bool(true), false),
            TypedValue::Bool(true)
        );
        assert_eq!(
            registry.get_typed("Absent", OptionKind::I32, TypedValue::I32(-1), false),
            TypedValue::I32(-1)
        );
    }

    #[test]
    fn reads_during_loads_see_whole_files() {
        let tmp = TempDir::new().expect("tmp");
        let a = write_file(&tmp, "a.conf", "X = 1\nY = 1\n");
        let b = write_file(&tmp, "b.conf", "X = 2\nY = 2\n");

        let registry = Arc::new(ConfigRegistry::new());
        assert!(registry.load_initial(&a));

        let writer = {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for i in 0..50 {
                    let path = if i % 2 == 0 { &b } else { &a };
                    assert!(registry.load_initial(path));
                }
            })
        };

        for _ in 0..200 {
            let snapshot = registry.snapshot();
            assert_eq!(snapshot.len(), 2);
            assert_eq!(snapshot.get("X"), snapshot.get("Y"));
            let x = registry.get_option::<u8>("X", 0, false);
            assert!(x == 1 || x == 2);
        }

        writer.join().expect("writer thread");
    }
}
