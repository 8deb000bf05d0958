#![cfg(feature = "config")]
use std::fs;

use waymark::config::{ConfigLoader, WaymarkConfig};
use waymark::route::{Route, methods::GET_HEAD};

const ENTREGAS_SHOW: Route = Route::new(
    "logistica.entregas.show",
    GET_HEAD,
    "/{locale}/logistica/entregas/{entrega}",
);

#[test]
fn configuration_files_drive_the_generator() {
    let dir = tempfile::Builder::new()
        .prefix("waymark-config")
        .tempdir_in(env!("CARGO_TARGET_TMPDIR"))
        .unwrap();
    fs::write(
        dir.path().join("base.yml"),
        r#"
origin: "https://erp.example.com"
defaults:
  params:
    locale: es
"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("dev.yml"),
        r#"
origin: "http://localhost:8000"
"#,
    )
    .unwrap();

    let config: WaymarkConfig = ConfigLoader::new()
        .configuration_dir(dir.path())
        .profile("dev")
        .load()
        .unwrap();
    let generator = config.generator();

    use waymark::route::RouteDescriptor;
    let url = generator.url(ENTREGAS_SHOW.template(), 15, None);
    // A bare value needs a template with a single required placeholder.
    assert!(url.is_err());

    let url = generator
        .url(ENTREGAS_SHOW.template(), waymark::params! { entrega: 15 }, None)
        .unwrap();
    assert_eq!(url, "http://localhost:8000/es/logistica/entregas/15");
}
