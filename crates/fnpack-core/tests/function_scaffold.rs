//! Integration tests for adding and removing function subprojects

mod support;

use fnpack_core::commands::{AddFunctionOptions, FunctionCommand};
use fnpack_core::config::FnpackSettings;
use fnpack_core::context::ProjectContext;
use fnpack_core::error::{FnpackError, ValidationError};
use fnpack_core::manifest::ServiceManifest;
use fnpack_core::package::PackageDescriptor;
use fnpack_core::scaffold::INSTALL_SCRIPT;

use support::{RecordingRunner, read_manifest, setup_project, write_function};

const MANIFEST: &str = "\
service: demo
provider:
  name: aws
functions:
  alpha:
    handler: functions/alpha/build/index.handler
resources:
  Resources: {}
";

fn validation_error(err: &anyhow::Error) -> Option<&ValidationError> {
    match err.downcast_ref::<FnpackError>() {
        Some(FnpackError::Validation(inner)) => Some(inner),
        _ => None,
    }
}

#[tokio::test]
async fn add_function_scaffolds_folder_and_manifest_entry() {
    let (temp, ctx) = setup_project(MANIFEST);
    let runner = RecordingRunner::new();

    let report = FunctionCommand::new(&ctx, &runner)
        .add(&AddFunctionOptions::new("createOrder"))
        .await
        .expect("Add should succeed");

    let folder = temp.path().join("functions/createOrder");
    assert_eq!(report.folder, folder);
    assert_eq!(report.package_name, "create-order");
    assert!(folder.join("src/index.js").exists());
    assert!(folder.join(".env.yml").exists());

    let manifest = read_manifest(temp.path());
    let lines: Vec<&str> = manifest.split('\n').collect();
    let functions_at = lines.iter().position(|l| *l == "functions:").unwrap();
    assert_eq!(lines[functions_at + 1], "  createOrder:");
    assert_eq!(
        lines[functions_at + 2],
        "    handler: functions/createOrder/build/index.handler"
    );
    assert!(lines[functions_at + 3].trim_start().starts_with("# "));
    assert!(manifest.contains("  alpha:\n    handler: functions/alpha/build/index.handler"));

    let parsed = ServiceManifest::parse(&manifest).expect("Manifest should stay valid YAML");
    let names: Vec<&str> = parsed.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["createOrder", "alpha"]);

    assert_eq!(
        runner.calls(),
        vec![(INSTALL_SCRIPT.to_string(), "createOrder".to_string())]
    );
}

#[tokio::test]
async fn add_function_writes_name_first_in_package_json() {
    let (temp, ctx) = setup_project(MANIFEST);
    let runner = RecordingRunner::new();

    FunctionCommand::new(&ctx, &runner)
        .add(&AddFunctionOptions::new("orders"))
        .await
        .unwrap();

    let descriptor =
        PackageDescriptor::load(&temp.path().join("functions/orders/package.json")).unwrap();
    assert_eq!(descriptor.name(), Some("orders"));
    assert_eq!(
        descriptor.keys(),
        vec!["name", "version", "private", "main", "scripts", "devDependencies", "babel"]
    );
    assert!(descriptor.has_script("build"));
    assert!(descriptor.has_script("clean"));
}

#[tokio::test]
async fn add_function_appends_functions_key_when_missing() {
    let (temp, ctx) = setup_project("service: demo\nprovider:\n  name: aws");
    let runner = RecordingRunner::new();

    FunctionCommand::new(&ctx, &runner)
        .add(&AddFunctionOptions::new("orders"))
        .await
        .unwrap();

    let manifest = read_manifest(temp.path());
    assert!(manifest.starts_with("service: demo\nprovider:\n  name: aws\nfunctions:\n  orders:\n"));
}

#[tokio::test]
async fn add_function_rejects_existing_manifest_entry_before_writing() {
    let (temp, ctx) = setup_project(MANIFEST);
    let runner = RecordingRunner::new();

    let err = FunctionCommand::new(&ctx, &runner)
        .add(&AddFunctionOptions::new("alpha"))
        .await
        .unwrap_err();

    assert_eq!(
        validation_error(&err),
        Some(&ValidationError::EntryExists("alpha".to_string()))
    );
    assert!(!temp.path().join("functions/alpha").exists());
    assert_eq!(read_manifest(temp.path()), MANIFEST);
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn add_function_rejects_existing_folder() {
    let (temp, ctx) = setup_project(MANIFEST);
    write_function(temp.path(), "orders", &["build"]);
    let runner = RecordingRunner::new();

    let err = FunctionCommand::new(&ctx, &runner)
        .add(&AddFunctionOptions::new("orders"))
        .await
        .unwrap_err();

    assert!(matches!(
        validation_error(&err),
        Some(ValidationError::FolderExists(_))
    ));
    assert_eq!(read_manifest(temp.path()), MANIFEST);
}

#[tokio::test]
async fn add_function_rejects_invalid_name() {
    let (temp, ctx) = setup_project(MANIFEST);
    let runner = RecordingRunner::new();

    let err = FunctionCommand::new(&ctx, &runner)
        .add(&AddFunctionOptions::new("../escape"))
        .await
        .unwrap_err();

    assert!(matches!(
        validation_error(&err),
        Some(ValidationError::InvalidName { .. })
    ));
    assert!(!temp.path().join("escape").exists());
}

#[tokio::test]
async fn add_function_with_unknown_overlay_fails_before_writing() {
    let (temp, ctx) = setup_project(MANIFEST);
    let runner = RecordingRunner::new();

    let err = FunctionCommand::new(&ctx, &runner)
        .add(&AddFunctionOptions::new("orders").with_template(Some("orda".to_string())))
        .await
        .unwrap_err();

    assert!(matches!(
        validation_error(&err),
        Some(ValidationError::MissingTemplate(_))
    ));
    assert!(!temp.path().join("functions/orders").exists());
}

#[tokio::test]
async fn add_function_applies_overlay_from_templates_dir() {
    let (temp, _) = setup_project(MANIFEST);
    let templates = temp.path().join("function-template");
    std::fs::create_dir_all(templates.join("default/src")).unwrap();
    std::fs::create_dir_all(templates.join("orda/src")).unwrap();
    std::fs::write(
        templates.join("default/package.json"),
        r#"{"version": "2.0.0", "name": "template", "scripts": {"build": "tsc"}}"#,
    )
    .unwrap();
    std::fs::write(templates.join("default/src/index.js"), "default").unwrap();
    std::fs::write(templates.join("orda/src/index.js"), "orda").unwrap();

    let settings = FnpackSettings {
        templates_dir: Some("function-template".into()),
        ..FnpackSettings::default()
    };
    let ctx = ProjectContext::new(temp.path().to_path_buf(), settings);
    let runner = RecordingRunner::new();

    FunctionCommand::new(&ctx, &runner)
        .add(&AddFunctionOptions::new("orders").with_template(Some("orda".to_string())))
        .await
        .unwrap();

    let folder = temp.path().join("functions/orders");
    assert_eq!(std::fs::read_to_string(folder.join("src/index.js")).unwrap(), "orda");
    let descriptor = PackageDescriptor::load(&folder.join("package.json")).unwrap();
    assert_eq!(descriptor.keys(), vec!["name", "version", "scripts"]);
    assert_eq!(descriptor.name(), Some("orders"));
}

#[tokio::test]
async fn failed_install_keeps_scaffolded_files() {
    let (temp, ctx) = setup_project(MANIFEST);
    let runner = RecordingRunner::failing(&["orders"]);

    let err = FunctionCommand::new(&ctx, &runner)
        .add(&AddFunctionOptions::new("orders"))
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<FnpackError>(),
        Some(FnpackError::Script(_))
    ));
    assert!(temp.path().join("functions/orders/package.json").exists());
    assert!(read_manifest(temp.path()).contains("  orders:"));
}

#[tokio::test]
async fn remove_function_deletes_folder_and_block() {
    let (temp, ctx) = setup_project(MANIFEST);
    write_function(temp.path(), "alpha", &["build"]);
    let runner = RecordingRunner::new();

    FunctionCommand::new(&ctx, &runner)
        .remove("alpha")
        .await
        .expect("Remove should succeed");

    assert!(!temp.path().join("functions/alpha").exists());
    assert_eq!(
        read_manifest(temp.path()),
        "service: demo\nprovider:\n  name: aws\nfunctions:\nresources:\n  Resources: {}\n"
    );
}

#[tokio::test]
async fn add_then_remove_restores_manifest() {
    let (temp, ctx) = setup_project(MANIFEST);
    let runner = RecordingRunner::new();
    let cmd = FunctionCommand::new(&ctx, &runner);

    cmd.add(&AddFunctionOptions::new("orders")).await.unwrap();
    assert_ne!(read_manifest(temp.path()), MANIFEST);

    cmd.remove("orders").await.unwrap();

    assert_eq!(read_manifest(temp.path()), MANIFEST);
    assert!(!temp.path().join("functions/orders").exists());
}

#[tokio::test]
async fn add_then_remove_restores_manifest_for_quoted_and_keyword_names() {
    for name in ["123", "true", "include", "environment"] {
        let (temp, ctx) = setup_project(MANIFEST);
        let runner = RecordingRunner::new();
        let cmd = FunctionCommand::new(&ctx, &runner);

        cmd.add(&AddFunctionOptions::new(name)).await.unwrap();
        let manifest = ServiceManifest::parse(&read_manifest(temp.path())).unwrap();
        let added = manifest.function(name).unwrap();
        assert_eq!(added.include, None, "{name} left package section active");
        assert_eq!(added.environment, None, "{name} left environment active");

        cmd.remove(name).await.unwrap();

        assert_eq!(read_manifest(temp.path()), MANIFEST, "round trip failed for {name}");
        assert!(!temp.path().join("functions").join(name).exists());
    }
}

#[tokio::test]
async fn remove_function_requires_folder() {
    let (temp, ctx) = setup_project(MANIFEST);
    let runner = RecordingRunner::new();

    let err = FunctionCommand::new(&ctx, &runner)
        .remove("alpha")
        .await
        .unwrap_err();

    assert!(matches!(
        validation_error(&err),
        Some(ValidationError::FolderMissing(_))
    ));
    assert_eq!(read_manifest(temp.path()), MANIFEST);
}

#[tokio::test]
async fn remove_function_requires_manifest_entry() {
    let (temp, ctx) = setup_project(MANIFEST);
    write_function(temp.path(), "orphan", &["build"]);
    let runner = RecordingRunner::new();

    let err = FunctionCommand::new(&ctx, &runner)
        .remove("orphan")
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<FnpackError>(),
        Some(FnpackError::ManifestEntryNotFound(name)) if name == "orphan"
    ));
    assert!(temp.path().join("functions/orphan").exists());
}
