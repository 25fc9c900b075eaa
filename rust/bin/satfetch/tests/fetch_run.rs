use std::path::Path;

use clap::Parser;
use domain::ports::RecordSourceError;
use mockito::{Matcher, Server};
use satfetch::{
    app,
    config::{Cli, Config},
};
use test_util::init_test_logging;

fn config_for(server_url: &str, input: &Path, output_dir: &Path) -> Config {
    let cli = Cli::parse_from([
        "satfetch",
        "--access-token",
        "pk.e2e",
        "--base-url",
        server_url,
        "--input",
        input.to_str().unwrap(),
        "--output-dir",
        output_dir.to_str().unwrap(),
        "--pacing-ms",
        "0",
    ]);
    Config::try_from(cli).unwrap()
}

fn tile_path(lon: &str, lat: &str) -> String {
    format!("/mapbox/satellite-v9/static/{},{},18/224x224@2x", lon, lat)
}

#[tokio::test]
async fn test_run_is_resumable_and_idempotent() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("points.csv");
    let output_dir = dir.path().join("images");
    std::fs::write(
        &input,
        "id,lat,long\n1,47.5,-122.3\n2,47.6,-122.2\n3,47.7,-122.1\n",
    )
    .unwrap();

    let mut server = Server::new_async().await;
    let ok_1 = server
        .mock("GET", tile_path("-122.3", "47.5").as_str())
        .match_query(Matcher::UrlEncoded("access_token".into(), "pk.e2e".into()))
        .with_status(200)
        .with_body("image-one")
        .expect(1)
        .create_async()
        .await;
    let not_found_2 = server
        .mock("GET", tile_path("-122.2", "47.6").as_str())
        .match_query(Matcher::Any)
        .with_status(404)
        .expect(2)
        .create_async()
        .await;
    let ok_3 = server
        .mock("GET", tile_path("-122.1", "47.7").as_str())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("image-three")
        .expect(1)
        .create_async()
        .await;

    let first = app::run(config_for(&server.url(), &input, &output_dir))
        .await
        .unwrap();

    assert_eq!(first.succeeded, 2);
    assert_eq!(first.failed, 1);
    assert_eq!(std::fs::read(output_dir.join("1.jpg")).unwrap(), b"image-one");
    assert_eq!(std::fs::read(output_dir.join("3.jpg")).unwrap(), b"image-three");
    assert!(!output_dir.join("2.jpg").exists());

    // 2回目は失敗したレコードだけを再取得する
    let second = app::run(config_for(&server.url(), &input, &output_dir))
        .await
        .unwrap();

    assert_eq!(second.skipped, 2);
    assert_eq!(second.failed, 1);

    ok_1.assert_async().await;
    not_found_2.assert_async().await;
    ok_3.assert_async().await;
}

#[tokio::test]
async fn test_run_aborts_on_missing_column() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("points.csv");
    let output_dir = dir.path().join("images");
    std::fs::write(&input, "id,long\n1,-122.3\n").unwrap();

    let mut server = Server::new_async().await;
    let any = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let result = app::run(config_for(&server.url(), &input, &output_dir)).await;

    let err = result.unwrap_err();
    match err.downcast_ref::<RecordSourceError>() {
        Some(RecordSourceError::MissingColumns(columns)) => {
            assert_eq!(columns, &vec!["lat".to_string()]);
        }
        _ => panic!("期待されるエラータイプではありません: {:#}", err),
    }
    assert!(!output_dir.exists(), "スキーマエラー時に出力ディレクトリが作成されています");
    any.assert_async().await;
}

#[tokio::test]
async fn test_run_fails_when_output_dir_is_a_file() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("points.csv");
    let output_dir = dir.path().join("images");
    std::fs::write(&input, "id,lat,long\n1,47.5,-122.3\n").unwrap();
    std::fs::write(&output_dir, b"").unwrap();

    let mut server = Server::new_async().await;
    let any = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let result = app::run(config_for(&server.url(), &input, &output_dir)).await;

    assert!(result.is_err());
    any.assert_async().await;
}
