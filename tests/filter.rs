//! Integration tests for the detection filter

use banken::{
    engine::filtering,
    models::Zone,
    test_helpers::{DetectionBuilder, MonitoringConfigBuilder},
};

#[test]
fn threshold_excludes_low_confidence_regardless_of_class_or_position() {
    let config = MonitoringConfigBuilder::new().threshold(0.6).build();
    for label in ["person", "cat", "dog"] {
        for (x, y) in [(100.0, 100.0), (430.0, 310.0), (700.0, 500.0)] {
            let detection =
                DetectionBuilder::new().label(label).confidence(0.59).bbox(x, y, 100.0, 100.0).build();
            assert!(
                filtering::qualify(&[detection], 960, 720, &config).is_empty(),
                "sub-threshold {} at ({}, {}) must be excluded",
                label,
                x,
                y
            );
        }
    }
}

#[test]
fn box_center_exactly_on_the_zone_boundary_qualifies() {
    let config = MonitoringConfigBuilder::new().zone_margin(0.1).build();
    let zone = Zone::from_margin(0.1, 960, 720);
    assert_eq!(zone, Zone { x: 96.0, y: 72.0, width: 768.0, height: 576.0 });

    // Center lands exactly on each corner of the zone.
    for (cx, cy) in [(96.0, 72.0), (864.0, 72.0), (96.0, 648.0), (864.0, 648.0)] {
        let detection =
            DetectionBuilder::new().bbox(cx - 50.0, cy - 50.0, 100.0, 100.0).build();
        assert_eq!(
            filtering::qualify(&[detection], 960, 720, &config).len(),
            1,
            "center ({}, {}) on the boundary must qualify",
            cx,
            cy
        );
    }
}

#[test]
fn filtering_twice_gives_identical_order_preserving_output() {
    let config = MonitoringConfigBuilder::new().build();
    let detections = vec![
        DetectionBuilder::new().label("cat").confidence(0.7).build(),
        DetectionBuilder::new().label("person").confidence(0.95).build(),
        DetectionBuilder::new().label("dog").confidence(0.55).build(),
    ];

    let first = filtering::qualify(&detections, 960, 720, &config);
    let second = filtering::qualify(&detections, 960, 720, &config);
    assert_eq!(first, second);

    let labels: Vec<&str> = first.iter().map(|d| d.label.as_str()).collect();
    assert_eq!(labels, ["cat", "person", "dog"]);
}

#[test]
fn area_threshold_end_to_end_scenario() {
    // Frame 960x720, zone margin 10%, threshold 0.5, min area 1%: the
    // minimum area is 6912 square pixels.
    let config =
        MonitoringConfigBuilder::new().threshold(0.5).zone_margin(0.1).min_area(0.01).build();

    let small = DetectionBuilder::new().confidence(0.8).bbox(400.0, 300.0, 50.0, 50.0).build();
    assert!(
        filtering::qualify(&[small], 960, 720, &config).is_empty(),
        "2500 square pixels is below the 6912 minimum"
    );

    let large = DetectionBuilder::new().confidence(0.8).bbox(400.0, 300.0, 100.0, 100.0).build();
    assert_eq!(
        filtering::qualify(&[large], 960, 720, &config).len(),
        1,
        "10000 square pixels clears the 6912 minimum"
    );
}

#[test]
fn frame_dimensions_are_read_per_frame() {
    // The same detection can qualify or not depending on the frame size the
    // filter is given, since zone and minimum area derive from it.
    let config = MonitoringConfigBuilder::new().min_area(0.01).build();
    let detection = DetectionBuilder::new().bbox(280.0, 200.0, 80.0, 80.0).build();

    assert_eq!(filtering::qualify(std::slice::from_ref(&detection), 640, 480, &config).len(), 1);
    // On a larger frame the same box falls below the area fraction.
    assert!(filtering::qualify(&[detection], 1920, 1440, &config).is_empty());
}
