//! Integration tests for the `strata` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const COMPOSER: &str = r#"{
    "name": "acme/shop",
    "autoload": {
        "psr-4": {
            "App\\": "app/"
        }
    }
}
"#;

fn project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("composer.json"), COMPOSER).unwrap();
    fs::create_dir_all(tmp.path().join("app")).unwrap();
    tmp
}

fn strata(project: &Path) -> Command {
    let mut cmd = Command::cargo_bin("strata").unwrap();
    cmd.current_dir(project)
        .env_remove("RUST_LOG")
        .env_remove("STRATA_PROJECT_DIR")
        .env_remove("STRATA_STUBS_DIR")
        .env("XDG_CONFIG_HOME", project.join(".config"))
        .env("NO_COLOR", "1");
    cmd
}

fn read(project: &Path, relative: &str) -> String {
    fs::read_to_string(project.join(relative))
        .unwrap_or_else(|e| panic!("cannot read {relative}: {e}"))
}

#[test]
fn test_help_flag() {
    let tmp = project();
    strata(tmp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("make:job"))
        .stdout(predicate::str::contains("list:features"));
}

#[test]
fn test_version_flag() {
    let tmp = project();
    strata(tmp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_make_job_queue_end_to_end() {
    let tmp = project();

    strata(tmp.path())
        .args(["make:job", "CreateInvoice", "Billing", "--queue"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Job CreateInvoiceJob created"))
        .stdout(predicate::str::contains(
            "app/Domains/Billing/Jobs/CreateInvoiceJob.php",
        ));

    let job = read(tmp.path(), "app/Domains/Billing/Jobs/CreateInvoiceJob.php");
    assert!(job.contains("namespace App\\Domains\\Billing\\Jobs;"));
    assert!(job.contains("class CreateInvoiceJob extends QueueableJob"));

    let test = read(
        tmp.path(),
        "tests/Unit/Domains/Billing/Jobs/CreateInvoiceJobTest.php",
    );
    assert!(test.contains("namespace Tests\\Unit\\Domains\\Billing\\Jobs;"));
    assert!(test.contains("CreateInvoiceJob"));
}

#[test]
fn test_project_flag_targets_another_directory() {
    let tmp = project();
    let elsewhere = TempDir::new().unwrap();

    strata(elsewhere.path())
        .arg("--project")
        .arg(tmp.path())
        .args(["make:model", "invoice"])
        .assert()
        .success();

    assert!(tmp.path().join("app/Data/Models/Invoice.php").is_file());
}

#[test]
fn test_service_lifecycle() {
    let tmp = project();

    strata(tmp.path())
        .args(["make:service", "online-shop"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Service OnlineShop created"))
        .stdout(predicate::str::contains("OnlineShopServiceProvider"));

    let provider = read(
        tmp.path(),
        "app/Services/OnlineShop/Providers/OnlineShopServiceProvider.php",
    );
    assert!(provider.contains("class OnlineShopServiceProvider"));
    assert!(tmp.path().join("app/Services/OnlineShop/routes/api.php").is_file());

    strata(tmp.path())
        .arg("list:services")
        .assert()
        .success()
        .stdout(predicate::str::contains("Service"))
        .stdout(predicate::str::contains("online_shop"))
        .stdout(predicate::str::contains("app/Services/OnlineShop"));

    strata(tmp.path())
        .args(["delete:service", "OnlineShop", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("service providers"));

    assert!(!tmp.path().join("app/Services/OnlineShop").exists());
}

#[test]
fn test_delete_service_requires_confirmation() {
    let tmp = project();
    strata(tmp.path())
        .args(["make:service", "Billing"])
        .assert()
        .success();

    // stdin is not a terminal, so the prompt cannot be shown
    strata(tmp.path())
        .args(["delete:service", "Billing"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));

    assert!(tmp.path().join("app/Services/Billing").is_dir());
}

#[test]
fn test_feature_with_jobs_is_described_in_order() {
    let tmp = project();
    for (job, domain) in [("CreateInvoice", "Billing"), ("SendInvoice", "Mail")] {
        strata(tmp.path())
            .args(["make:job", job, domain])
            .assert()
            .success();
    }
    strata(tmp.path())
        .args(["make:service", "Billing"])
        .assert()
        .success();

    strata(tmp.path())
        .args([
            "make:feature",
            "IssueInvoice",
            "Billing",
            "--job",
            "App\\Domains\\Billing\\Jobs\\CreateInvoiceJob",
            "--job",
            "App\\Domains\\Mail\\Jobs\\SendInvoiceJob",
        ])
        .assert()
        .success();

    let feature = read(
        tmp.path(),
        "app/Services/Billing/Features/IssueInvoiceFeature.php",
    );
    assert!(feature.contains("use App\\Domains\\Billing\\Jobs\\CreateInvoiceJob;"));
    assert!(feature.contains("$this->run(SendInvoiceJob::class);"));

    let output = strata(tmp.path())
        .args(["describe:feature", "IssueInvoice"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();

    let first = stdout.find("CreateInvoiceJob.php").unwrap();
    let second = stdout.find("SendInvoiceJob.php").unwrap();
    assert!(first < second, "jobs out of order:\n{stdout}");
}

#[test]
fn test_describe_feature_resolves_job_by_namespace() {
    let tmp = project();
    for domain in ["Billing", "Mail"] {
        strata(tmp.path())
            .args(["make:job", "Notify", domain])
            .assert()
            .success();
    }
    strata(tmp.path())
        .args([
            "make:feature",
            "SendReminder",
            "--job",
            "App\\Domains\\Mail\\Jobs\\NotifyJob",
        ])
        .assert()
        .success();

    strata(tmp.path())
        .args(["describe:feature", "SendReminder"])
        .assert()
        .success()
        .stdout(predicate::str::contains("app/Domains/Mail/Jobs/NotifyJob.php"))
        .stdout(predicate::str::contains("app/Domains/Billing/Jobs/NotifyJob.php").not());
}

#[test]
fn test_feature_without_service_is_listed() {
    let tmp = project();
    strata(tmp.path())
        .args(["init:monolith"])
        .assert()
        .success();
    strata(tmp.path())
        .args(["make:feature", "ImportLedger"])
        .assert()
        .success();

    strata(tmp.path())
        .arg("list:features")
        .assert()
        .success()
        .stdout(predicate::str::contains("ImportLedgerFeature.php"));
    strata(tmp.path())
        .args(["describe:feature", "ImportLedger"])
        .assert()
        .success()
        .stdout(predicate::str::contains("runs no jobs"));
}

#[test]
fn test_list_features_groups_by_service() {
    let tmp = project();
    strata(tmp.path())
        .args(["init:monolith", "Billing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("app/Domains"));

    strata(tmp.path())
        .args(["make:feature", "Invoices/IssueInvoice", "Billing"])
        .assert()
        .success();

    strata(tmp.path())
        .args(["list:features", "billing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Billing"))
        .stdout(predicate::str::contains("IssueInvoiceFeature.php"));
}

#[test]
fn test_delete_last_job_removes_domain() {
    let tmp = project();
    strata(tmp.path())
        .args(["make:job", "CreateInvoice", "Billing"])
        .assert()
        .success();

    strata(tmp.path())
        .args(["delete:job", "CreateInvoice", "Billing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("removed with its last job"));

    assert!(!tmp.path().join("app/Domains/Billing").exists());
}

#[test]
fn test_delete_last_job_keeps_domain_with_requests() {
    let tmp = project();
    strata(tmp.path())
        .args(["make:request", "StoreInvoice", "Billing"])
        .assert()
        .success();
    strata(tmp.path())
        .args(["make:job", "CreateInvoice", "Billing"])
        .assert()
        .success();

    strata(tmp.path())
        .args(["delete:job", "CreateInvoice", "Billing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("removed with its last job").not());

    assert!(
        tmp.path()
            .join("app/Domains/Billing/Requests/StoreInvoice.php")
            .is_file()
    );
}

#[test]
fn test_search_lists_names_without_scores() {
    let tmp = project();
    strata(tmp.path())
        .args(["make:job", "CreateInvoice", "Billing"])
        .assert()
        .success();

    let output = strata(tmp.path())
        .args(["--output-format", "json", "search", "createinvoice"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["jobs"][0]["class_name"], "CreateInvoiceJob");
    assert!(value["jobs"][0].get("score").is_none());

    strata(tmp.path())
        .args(["search", "createinvoice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Score").not());
}

#[test]
fn test_search_ranks_jobs() {
    let tmp = project();
    for (job, domain) in [("CreateInvoice", "Billing"), ("ArchiveLogs", "Ops")] {
        strata(tmp.path())
            .args(["make:job", job, domain])
            .assert()
            .success();
    }

    strata(tmp.path())
        .args(["search", "create", "invoice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CreateInvoiceJob.php"))
        .stdout(predicate::str::contains("ArchiveLogsJob.php").not());
}

#[test]
fn test_json_output_is_parseable() {
    let tmp = project();
    strata(tmp.path())
        .args(["make:job", "CreateInvoice", "Billing"])
        .assert()
        .success();

    let output = strata(tmp.path())
        .args(["--output-format", "json", "list:jobs"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let jobs = value["Billing"].as_array().unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0]["class_name"], "CreateInvoiceJob");
}

#[test]
fn test_src_name_rewrites_namespace() {
    let tmp = project();
    strata(tmp.path())
        .args(["make:job", "CreateInvoice", "Billing"])
        .assert()
        .success();

    strata(tmp.path())
        .args(["src:name", "Acme"])
        .assert()
        .success()
        .stdout(predicate::str::contains("from App to Acme"));

    assert!(read(tmp.path(), "composer.json").contains(r#""Acme\\""#));
    assert!(
        read(tmp.path(), "app/Domains/Billing/Jobs/CreateInvoiceJob.php")
            .contains("namespace Acme\\Domains\\Billing\\Jobs;")
    );
}

#[test]
fn test_init_micro_lists_created_directories() {
    let tmp = project();
    strata(tmp.path())
        .arg("init:micro")
        .assert()
        .success()
        .stdout(predicate::str::contains("app/Features"))
        .stdout(predicate::str::contains("tests/Unit/Operations"));

    assert!(tmp.path().join("app/Operations/.gitkeep").is_file());
}

#[test]
fn test_completions_bash() {
    let tmp = project();
    strata(tmp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("strata"));
}

#[test]
fn test_completions_need_no_project() {
    let empty = TempDir::new().unwrap();
    strata(empty.path())
        .args(["completions", "zsh"])
        .assert()
        .success();
}
