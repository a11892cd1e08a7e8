use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::CliTest;

#[test]
fn test_check_reports_undefined_keys() -> Result<()> {
    let test = CliTest::laravel()?;

    assert_cmd_snapshot!(test.check_command(), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    error: Environment variable is not defined "APP_KEY"
      --> config/app.php:5:14
      |
    5 |     'key' => env('APP_KEY'),
      |              ^

    error: Environment variable is not defined "MISSING_KEY"
      --> config/app.php:6:18
      |
    6 |     'missing' => env('MISSING_KEY'),
      |                  ^

    ✘ 2 problems (2 errors)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_check_clean_project() -> Result<()> {
    let test = CliTest::laravel()?;
    test.write_file(".env", "APP_NAME=Laravel\nAPP_KEY=\nMISSING_KEY=1\n")?;

    assert_cmd_snapshot!(test.check_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 source file - no issues found

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_check_with_path_argument() -> Result<()> {
    let test = CliTest::laravel()?;

    let mut cmd = test.command();
    cmd.current_dir(test.root().join("config"));
    cmd.args(["check", ".."]);

    assert_cmd_snapshot!(cmd, @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    error: Environment variable is not defined "APP_KEY"
      --> config/app.php:5:14
      |
    5 |     'key' => env('APP_KEY'),
      |              ^

    error: Environment variable is not defined "MISSING_KEY"
      --> config/app.php:6:18
      |
    6 |     'missing' => env('MISSING_KEY'),
      |                  ^

    ✘ 2 problems (2 errors)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_check_missing_env_file_is_an_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("config/app.php", crate::APP_CONFIG)?;

    insta::with_settings!({ filters => test.filters() }, {
        assert_cmd_snapshot!(test.check_command(), @r"
        success: false
        exit_code: 2
        ----- stdout -----

        ----- stderr -----
        Error: failed to read env file [ROOT]/.env: No such file or directory (os error 2)
        ");
    });

    Ok(())
}

#[test]
fn test_check_env_file_override() -> Result<()> {
    let test = CliTest::laravel()?;
    test.write_file(
        ".env.testing",
        "APP_NAME=Testing\nAPP_KEY=abc\nMISSING_KEY=\n",
    )?;

    assert_cmd_snapshot!(test.check_command().args(["--env-file", ".env.testing"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 source file - no issues found

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_check_respects_config_includes_and_functions() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".envlensrc.json",
        r#"{ "includes": ["src"], "functions": ["env", "envOr"] }"#,
    )?;
    test.write_file(".env", "APP_NAME=Laravel\n")?;
    test.write_file("src/Service.php", "<?php\n$x = envOr('FROM_HELPER');\n")?;
    test.write_file("config/app.php", "<?php\n$y = env('NOT_SCANNED');\n")?;

    assert_cmd_snapshot!(test.check_command(), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    error: Environment variable is not defined "FROM_HELPER"
      --> src/Service.php:2:6
      |
    2 | $x = envOr('FROM_HELPER');
      |      ^

    ✘ 1 problem (1 error)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_check_ignores_vendor() -> Result<()> {
    let test = CliTest::laravel()?;
    test.write_file(".env", "APP_NAME=Laravel\nAPP_KEY=\nMISSING_KEY=1\n")?;
    test.write_file("app/vendor/pkg/Thing.php", "<?php\nenv('VENDOR_ONLY');\n")?;

    assert_cmd_snapshot!(test.check_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 source file - no issues found

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_check_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::laravel()?;
    test.write_file(".envlensrc.json", r#"{ "ignores": ["[invalid"] }"#)?;

    assert_cmd_snapshot!(test.check_command(), @r#"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Invalid glob pattern in 'ignores': "[invalid"
    "#);

    Ok(())
}

#[test]
fn test_check_warns_about_unreadable_sources() -> Result<()> {
    let test = CliTest::laravel()?;
    test.write_file(".env", "APP_NAME=Laravel\nAPP_KEY=\nMISSING_KEY=1\n")?;
    std::fs::create_dir_all(test.root().join("app"))?;
    std::fs::write(test.root().join("app/Broken.php"), [0xff, 0xfe, 0x00])?;

    assert_cmd_snapshot!(test.check_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 2 source files - no issues found

    ----- stderr -----
    warning: 1 file(s) could not be read (use -v for details)
    ");

    Ok(())
}
