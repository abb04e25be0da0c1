use std::env;
use std::time::{Duration, Instant};

use testcontainers::core::{IntoContainerPort, Mount};
use testcontainers::runners::SyncRunner;
use testcontainers::{Container, GenericImage, ImageExt, ReuseDirective, TestcontainersError};

use stop_planner::osrm::{OsrmClient, OsrmConfig};
use stop_planner::osrm_data::{GeofabrikRegion, OsrmDataset, OsrmDatasetConfig};
use stop_planner::{
    Coordinate, Place, PlannerOptions, RouteProvider, TravelProfile, compute_optimized_route,
};

fn osrm_container(
    profile: TravelProfile,
) -> Result<(Container<GenericImage>, String), TestcontainersError> {
    let data_root = env::var("OSRM_DATA_DIR").unwrap_or_else(|_| "osrm-data".to_string());
    let region = GeofabrikRegion::new("europe/monaco");
    let config = OsrmDatasetConfig::new(region, data_root, profile);
    let dataset = OsrmDataset::ensure(&config)
        .map_err(|err| TestcontainersError::other(format!("OSRM prep failed: {}", err)))?;
    let container_name = format!("osrm-monaco-{}", profile.token());

    let image = GenericImage::new("osrm/osrm-backend", "latest")
        .with_exposed_port(5000.tcp())
        .with_mount(Mount::bind_mount(
            dataset.data_dir.to_string_lossy().to_string(),
            "/data",
        ))
        .with_cmd(vec![
            "osrm-routed".to_string(),
            "--algorithm".to_string(),
            "mld".to_string(),
            format!("/data/{}", dataset.osrm_file_name()),
        ])
        .with_container_name(container_name)
        .with_startup_timeout(Duration::from_secs(30))
        .with_reuse(ReuseDirective::Always);

    let container = image.start()?;
    let port = container.get_host_port_ipv4(5000.tcp())?;
    let base_url = format!("http://127.0.0.1:{}", port);

    Ok((container, base_url))
}

fn monaco_places() -> Vec<Place> {
    vec![
        Place::new("casino", "Casino de Monte-Carlo", Coordinate::new(43.7394, 7.4281)),
        Place::new("palace", "Prince's Palace", Coordinate::new(43.7314, 7.4200)),
        Place::new("museum", "Oceanographic Museum", Coordinate::new(43.7308, 7.4254)),
        Place::new("larvotto", "Larvotto Beach", Coordinate::new(43.7447, 7.4363)),
    ]
}

#[test]
#[ignore = "requires docker and network access"]
fn osrm_backed_route_has_real_legs() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let (container, base_url) = osrm_container(TravelProfile::Driving).expect("start OSRM container");
    let client = OsrmClient::new(OsrmConfig {
        base_url,
        timeout_secs: 10,
    })
    .expect("build OSRM client");

    let places = monaco_places();

    // osrm-routed may still be loading the graph after the port opens.
    let started = Instant::now();
    while started.elapsed() < Duration::from_secs(15) {
        if client
            .route(places[0].location, places[1].location, TravelProfile::Driving)
            .is_ok()
        {
            break;
        }
        std::thread::sleep(Duration::from_millis(500));
    }

    let route = compute_optimized_route(
        &client,
        &places,
        Some(places[0].location),
        TravelProfile::Driving,
        &PlannerOptions {
            threshold_km: 2.0,
            ..PlannerOptions::default()
        },
    )
    .expect("optimize");

    if route.fallback_legs().count() > 0 {
        if let Ok(stderr) = container.stderr_to_vec() {
            eprintln!("OSRM stderr:\n{}", String::from_utf8_lossy(&stderr));
        }
    }
    assert_eq!(route.legs.len(), places.len());
    assert_eq!(route.fallback_legs().count(), 0);
    assert!(route.legs.iter().all(|leg| leg.geometry.is_some()));
    assert!(route.total_duration_secs > 0.0);

    drop(container);
}
