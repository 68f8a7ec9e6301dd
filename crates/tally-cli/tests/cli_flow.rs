use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use rusqlite::Connection;
use serde_json::Value;
use tempfile::TempDir;

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_tally"))
}

/// An isolated config home and ledger location for one test.
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new(prefix: &str) -> Self {
        let dir = tempfile::Builder::new()
            .prefix(prefix)
            .tempdir()
            .expect("create temp dir");
        Self { dir }
    }

    fn ledger_path(&self) -> PathBuf {
        self.dir.path().join("data").join("tally.db")
    }

    fn config_path(&self) -> PathBuf {
        self.dir.path().join("config").join("config.toml")
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(bin());
        cmd.env("TALLY_CONFIG", self.config_path())
            .env("XDG_CONFIG_HOME", self.dir.path().join("xdg-config"))
            .env("XDG_DATA_HOME", self.dir.path().join("xdg-data"))
            .env("NO_COLOR", "1")
            .env_remove("TALLY_PATH")
            .env_remove("TALLY_USER")
            .env_remove("TALLY_PASSWORD")
            .env_remove("TALLY_LOG");
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.command().args(args).output().expect("run tally")
    }

    fn run_ok(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "tally {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    fn run_json(&self, args: &[&str]) -> Value {
        let stdout = self.run_ok(args);
        serde_json::from_str(&stdout).expect("valid json")
    }

    /// Initialized ledger with one signed-up default user.
    fn with_user(prefix: &str) -> Self {
        let sandbox = Self::new(prefix);
        let ledger = sandbox.ledger_path();
        sandbox.run_ok(&["init", ledger.to_str().expect("utf8 path")]);
        sandbox.run_ok(&[
            "signup",
            "--username",
            "alice",
            "--email",
            "alice@example.com",
            "--password",
            "pw",
        ]);
        sandbox
    }
}

fn exit_code(output: &Output) -> i32 {
    output.status.code().expect("exit code")
}

fn add_dashboard_transactions(sandbox: &Sandbox) {
    sandbox.run_ok(&[
        "add",
        "--amount",
        "2000",
        "--income",
        "--category",
        "Salary",
        "--date",
        "2024-01-01",
    ]);
    sandbox.run_ok(&[
        "add",
        "--amount",
        "45.50",
        "--expense",
        "--category",
        "Food & Dining",
        "--description",
        "Dinner out",
        "--date",
        "2024-01-10",
    ]);
}

fn write_config(path: &Path, ledger: &Path) {
    std::fs::create_dir_all(path.parent().expect("config parent")).expect("create config dir");
    std::fs::write(
        path,
        format!("[ledger]\npath = \"{}\"\n", ledger.to_string_lossy()),
    )
    .expect("write config");
}

#[test]
fn test_cli_init_writes_config_and_creates_ledger() {
    let sandbox = Sandbox::new("tally_cli_init");
    let ledger = sandbox.ledger_path();

    let stdout = sandbox.run_ok(&["init", ledger.to_str().expect("utf8 path")]);
    assert!(stdout.contains("status=ok"));
    assert!(stdout.contains("schema=v3"));
    assert!(ledger.exists());

    let config = std::fs::read_to_string(sandbox.config_path()).expect("config written");
    assert!(config.contains("[ledger]"));
    assert!(config.contains(&ledger.to_string_lossy().to_string()));
}

#[test]
fn test_cli_init_quiet_suppresses_output() {
    let sandbox = Sandbox::new("tally_cli_quiet");
    let ledger = sandbox.ledger_path();
    let stdout = sandbox.run_ok(&["--quiet", "init", ledger.to_str().expect("utf8 path")]);
    assert!(stdout.trim().is_empty());
}

#[test]
fn test_cli_signup_makes_first_user_default() {
    let sandbox = Sandbox::with_user("tally_cli_signup");
    let config = std::fs::read_to_string(sandbox.config_path()).expect("config");
    assert!(config.contains("default = \"alice\""));

    let stdout = sandbox.run_ok(&[
        "signup",
        "--username",
        "bob",
        "--email",
        "bob@example.com",
        "--password",
        "pw",
    ]);
    assert!(stdout.contains("username=bob"));
    assert!(stdout.contains("default=no"));
}

#[test]
fn test_cli_signup_duplicate_username_is_invalid_input() {
    let sandbox = Sandbox::with_user("tally_cli_dup");
    let output = sandbox.run(&[
        "signup",
        "--username",
        "alice",
        "--email",
        "other@example.com",
        "--password",
        "pw",
    ]);
    assert_eq!(exit_code(&output), 4);
}

#[test]
fn test_cli_signup_reads_password_from_env() {
    let sandbox = Sandbox::with_user("tally_cli_env_pw");
    let output = sandbox
        .command()
        .args(["signup", "--username", "carol", "--email", "carol@example.com"])
        .env("TALLY_PASSWORD", "secret")
        .output()
        .expect("run signup");
    assert!(output.status.success());

    let login = sandbox
        .command()
        .args(["login", "--email", "carol@example.com"])
        .env("TALLY_PASSWORD", "secret")
        .output()
        .expect("run login");
    assert!(login.status.success());
}

#[test]
fn test_cli_signup_without_password_or_tty_fails() {
    let sandbox = Sandbox::with_user("tally_cli_no_pw");
    let output = sandbox.run(&["signup", "--username", "dave", "--email", "dave@example.com"]);
    assert_eq!(exit_code(&output), 4);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("TALLY_PASSWORD"));
}

#[test]
fn test_cli_login_switches_default_user() {
    let sandbox = Sandbox::with_user("tally_cli_login");
    sandbox.run_ok(&[
        "signup",
        "--username",
        "bob",
        "--email",
        "bob@example.com",
        "--password",
        "hunter2",
    ]);

    let stdout = sandbox.run_ok(&["login", "--email", "bob@example.com", "--password", "hunter2"]);
    assert!(stdout.contains("username=bob"));
    let config = std::fs::read_to_string(sandbox.config_path()).expect("config");
    assert!(config.contains("default = \"bob\""));
}

#[test]
fn test_cli_login_wrong_password_fails() {
    let sandbox = Sandbox::with_user("tally_cli_bad_login");
    let output = sandbox.run(&["login", "--email", "alice@example.com", "--password", "nope"]);
    assert_eq!(exit_code(&output), 5);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid email or password"));

    let unknown = sandbox.run(&["login", "--email", "nobody@example.com", "--password", "pw"]);
    assert_eq!(exit_code(&unknown), 5);
}

#[test]
fn test_cli_dashboard_summary() {
    let sandbox = Sandbox::with_user("tally_cli_summary");
    add_dashboard_transactions(&sandbox);

    let summary = sandbox.run_json(&["summary", "--json"]);
    assert_eq!(summary["balance"].as_f64(), Some(1954.5));
    assert_eq!(summary["income"].as_f64(), Some(2000.0));
    assert_eq!(summary["expense"].as_f64(), Some(45.5));
    assert_eq!(summary["count"], 2);

    let plain = sandbox.run_ok(&["summary"]);
    assert!(plain.contains("balance=1954.50"));
    assert!(plain.contains("transactions=2"));
}

#[test]
fn test_cli_list_json_newest_first() {
    let sandbox = Sandbox::with_user("tally_cli_list");
    add_dashboard_transactions(&sandbox);

    let list = sandbox.run_json(&["list", "--json"]);
    let items = list.as_array().expect("array");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["category"], "Food & Dining");
    assert_eq!(items[0]["kind"], "expense");
    assert_eq!(items[0]["amount"].as_f64(), Some(-45.5));
    assert_eq!(items[0]["date"], "2024-01-10");
    assert_eq!(items[1]["category"], "Salary");
    assert_eq!(items[1]["description"], "Salary");
}

#[test]
fn test_cli_list_plain_and_limit() {
    let sandbox = Sandbox::with_user("tally_cli_list_plain");
    add_dashboard_transactions(&sandbox);

    let stdout = sandbox.run_ok(&["list", "--format", "plain"]);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("-45.50"));
    assert!(lines[1].ends_with("+2000.00"));

    let limited = sandbox.run_json(&["list", "--json", "--limit", "1"]);
    assert_eq!(limited.as_array().expect("array").len(), 1);
}

#[test]
fn test_cli_list_json_rejects_format() {
    let sandbox = Sandbox::with_user("tally_cli_list_conflict");
    let output = sandbox.run(&["list", "--json", "--format", "plain"]);
    assert_eq!(exit_code(&output), 4);
}

#[test]
fn test_cli_list_empty_message() {
    let sandbox = Sandbox::with_user("tally_cli_list_empty");
    let stdout = sandbox.run_ok(&["list"]);
    assert!(stdout.contains("No transactions yet"));
}

#[test]
fn test_cli_report_breakdown() {
    let sandbox = Sandbox::with_user("tally_cli_report");
    add_dashboard_transactions(&sandbox);
    sandbox.run_ok(&[
        "add",
        "--amount",
        "4.50",
        "--expense",
        "--category",
        "Food & Dining",
    ]);

    let report = sandbox.run_json(&["report", "--json"]);
    assert_eq!(report["count"], 3);
    assert_eq!(report["highest_expense"].as_f64(), Some(45.5));
    assert_eq!(report["average_expense"].as_f64(), Some(25.0));
    assert_eq!(report["expense_by_category"]["Food & Dining"].as_f64(), Some(50.0));
    assert_eq!(report["income_by_category"]["Salary"].as_f64(), Some(2000.0));

    let plain = sandbox.run_ok(&["report"]);
    assert!(plain.contains("expense|Food & Dining=50.00"));
    assert!(plain.contains("income|Salary=2000.00"));
}

#[test]
fn test_cli_show_edit_delete() {
    let sandbox = Sandbox::with_user("tally_cli_edit");
    add_dashboard_transactions(&sandbox);

    let shown = sandbox.run_json(&["show", "2", "--json"]);
    assert_eq!(shown["description"], "Dinner out");

    sandbox.run_ok(&["edit", "2", "--amount", "50", "--description", "Groceries"]);
    let shown = sandbox.run_json(&["show", "2", "--json"]);
    assert_eq!(shown["amount"].as_f64(), Some(-50.0));
    assert_eq!(shown["description"], "Groceries");
    assert_eq!(shown["category"], "Food & Dining");

    // A direction flag alone flips the sign and keeps the magnitude.
    sandbox.run_ok(&["edit", "2", "--income"]);
    let shown = sandbox.run_json(&["show", "2", "--json"]);
    assert_eq!(shown["amount"].as_f64(), Some(50.0));
    assert_eq!(shown["kind"], "income");

    sandbox.run_ok(&["delete", "2"]);
    let missing = sandbox.run(&["show", "2"]);
    assert_eq!(exit_code(&missing), 3);

    let summary = sandbox.run_json(&["summary", "--json"]);
    assert_eq!(summary["count"], 1);
}

#[test]
fn test_cli_edit_without_changes_is_invalid() {
    let sandbox = Sandbox::with_user("tally_cli_edit_noop");
    add_dashboard_transactions(&sandbox);
    let output = sandbox.run(&["edit", "1"]);
    assert_eq!(exit_code(&output), 4);
}

#[test]
fn test_cli_missing_transaction_is_not_found() {
    let sandbox = Sandbox::with_user("tally_cli_missing");
    for args in [["show", "99"], ["delete", "99"]] {
        let output = sandbox.run(&args);
        assert_eq!(exit_code(&output), 3, "tally {:?}", args);
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Transaction 99 not found"));
        assert!(stderr.contains("hint="));
    }
    let edit = sandbox.run(&["edit", "99", "--amount", "5"]);
    assert_eq!(exit_code(&edit), 3);
}

#[test]
fn test_cli_transactions_are_private_to_their_user() {
    let sandbox = Sandbox::with_user("tally_cli_private");
    add_dashboard_transactions(&sandbox);
    sandbox.run_ok(&[
        "signup",
        "--username",
        "bob",
        "--email",
        "bob@example.com",
        "--password",
        "pw",
    ]);

    let as_bob = sandbox.run(&["--user", "bob", "show", "1"]);
    assert_eq!(exit_code(&as_bob), 3);

    let list = sandbox.run_json(&["--user", "bob", "list", "--json"]);
    assert!(list.as_array().expect("array").is_empty());
}

#[test]
fn test_cli_add_rejects_bad_input() {
    let sandbox = Sandbox::with_user("tally_cli_bad_add");
    let cases: [&[&str]; 6] = [
        &["add", "--amount", "abc", "--expense", "--category", "Food & Dining"],
        &["add", "--amount", "-5", "--expense", "--category", "Food & Dining"],
        &["add", "--amount", "0", "--income", "--category", "Salary"],
        &["add", "--amount", "5000000000000", "--income", "--category", "Salary"],
        &["add", "--amount", "12345678901.23456789", "--income", "--category", "Salary"],
        &["add", "--amount", "5", "--income", "--category", "Salary", "--date", "01/02/2024"],
    ];
    for args in cases {
        let output = sandbox.run(args);
        assert_eq!(exit_code(&output), 4, "tally {:?}", args);
    }

    let summary = sandbox.run_json(&["summary", "--json"]);
    assert_eq!(summary["count"], 0);
}

#[test]
fn test_cli_add_requires_direction() {
    let sandbox = Sandbox::with_user("tally_cli_direction");
    let output = sandbox.run(&["add", "--amount", "5", "--category", "Food & Dining"]);
    assert!(!output.status.success());
}

#[test]
fn test_cli_unknown_user_is_not_found() {
    let sandbox = Sandbox::with_user("tally_cli_unknown_user");
    let output = sandbox.run(&["--user", "ghost", "list"]);
    assert_eq!(exit_code(&output), 3);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("User \"ghost\" not found"));
}

#[test]
fn test_cli_missing_config_message() {
    let sandbox = Sandbox::new("tally_cli_no_config");
    let output = sandbox.run(&["list"]);
    assert_eq!(exit_code(&output), 3);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No ledger configured"));
    assert!(stderr.contains("tally init"));
}

#[test]
fn test_cli_missing_ledger_message() {
    let sandbox = Sandbox::new("tally_cli_no_ledger");
    write_config(&sandbox.config_path(), &sandbox.ledger_path());
    let output = sandbox.run(&["summary"]);
    assert_eq!(exit_code(&output), 3);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No ledger found"));
    assert!(!sandbox.ledger_path().exists());
}

#[test]
fn test_cli_newer_schema_is_rejected() {
    let sandbox = Sandbox::new("tally_cli_newer");
    let ledger = sandbox.ledger_path();
    std::fs::create_dir_all(ledger.parent().expect("parent")).expect("create dir");
    {
        let conn = Connection::open(&ledger).expect("open sqlite");
        conn.execute_batch("PRAGMA user_version = 99;")
            .expect("set version");
    }

    let output = sandbox.run(&["--ledger", ledger.to_str().expect("utf8 path"), "check"]);
    assert_eq!(exit_code(&output), 7);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unsupported schema version 99"));
}

#[test]
fn test_cli_init_migrates_legacy_store() {
    let sandbox = Sandbox::new("tally_cli_legacy");
    let ledger = sandbox.ledger_path();
    std::fs::create_dir_all(ledger.parent().expect("parent")).expect("create dir");
    {
        let conn = Connection::open(&ledger).expect("open sqlite");
        conn.execute_batch(
            "CREATE TABLE expenses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount REAL,
                category TEXT,
                description TEXT,
                created_at INTEGER
            );
            INSERT INTO expenses (amount, category, description, created_at)
                VALUES (-12.5, 'Food & Dining', 'Lunch', 1704844800000);
            PRAGMA user_version = 1;",
        )
        .expect("write legacy store");
    }

    let stdout = sandbox.run_ok(&["init", ledger.to_str().expect("utf8 path")]);
    assert!(stdout.contains("Opened existing ledger") || stdout.contains("schema=v3"));

    let list = sandbox.run_json(&["--user", "default", "list", "--json"]);
    let items = list.as_array().expect("array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["amount"].as_f64(), Some(-12.5));
    assert_eq!(items[0]["date"], "2024-01-10");
}

#[test]
fn test_cli_check_passes_and_detects_corruption() {
    let sandbox = Sandbox::with_user("tally_cli_check");
    add_dashboard_transactions(&sandbox);

    let stdout = sandbox.run_ok(&["check"]);
    assert!(stdout.contains("Integrity check passed"));

    {
        let conn = Connection::open(sandbox.ledger_path()).expect("open sqlite");
        conn.execute(
            "INSERT INTO transactions (user_id, amount, category, description, date, created_at)
             VALUES (1, 0, 'Other', 'broken', '2024-01-01', 0)",
            [],
        )
        .expect("insert zero amount");
    }

    let output = sandbox.run(&["check"]);
    assert_eq!(exit_code(&output), 6);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Integrity check failed"));
}

#[test]
fn test_cli_clear_requires_confirmation_without_tty() {
    let sandbox = Sandbox::with_user("tally_cli_clear");
    add_dashboard_transactions(&sandbox);

    let refused = sandbox.run(&["clear"]);
    assert_eq!(exit_code(&refused), 4);
    let summary = sandbox.run_json(&["summary", "--json"]);
    assert_eq!(summary["count"], 2);

    let stdout = sandbox.run_ok(&["clear", "--yes"]);
    assert!(stdout.contains("Deleted 2 transactions"));
    let summary = sandbox.run_json(&["summary", "--json"]);
    assert_eq!(summary["count"], 0);
}

#[test]
fn test_cli_categories_lists_suggestions() {
    let sandbox = Sandbox::new("tally_cli_categories");
    let stdout = sandbox.run_ok(&["categories", "--income"]);
    assert!(stdout.contains("income=Salary"));
    assert!(!stdout.contains("expense="));

    let all = sandbox.run_ok(&["categories"]);
    assert!(all.contains("expense=Food & Dining"));
    assert!(all.contains("income=Gift"));
}

#[test]
fn test_cli_completions_bash() {
    let sandbox = Sandbox::new("tally_cli_completions");
    let stdout = sandbox.run_ok(&["completions", "bash"]);
    assert!(stdout.contains("tally"));
}

#[test]
fn test_cli_no_command_prints_quickstart() {
    let sandbox = Sandbox::new("tally_cli_bare");
    let stdout = sandbox.run_ok(&[]);
    assert!(stdout.contains("Quickstart"));
}
