extern crate bvr_rbox;

use ndarray::array;
use bvr_rbox::common::{ComputeDevice, IouMethod};
use bvr_rbox::data::{ConfigRbox, DEFAULT_IOU_THRESHOLD};
use bvr_rbox::engines::RboxRunner;
use bvr_rbox::RboxError;

#[test]
fn config_from_json() {
    let config = ConfigRbox::from_json_str(r#"{ "method": "box", "iou_threshold": 0.3 }"#).unwrap();
    assert_eq!(config.method, IouMethod::Box);
    assert_eq!(config.device, ComputeDevice::Reference);
    assert_eq!(config.iou_threshold, 0.3);
    assert!(!config.profile);

    let config = ConfigRbox::from_json_str(r#"{ "device": { "Accelerated": 2 }, "profile": true }"#).unwrap();
    assert_eq!(config.device, ComputeDevice::Accelerated(2));
    assert_eq!(config.iou_threshold, DEFAULT_IOU_THRESHOLD);

    assert!(ConfigRbox::from_json_str(r#"{ "method": "polygon" }"#).is_err());
}

#[test]
fn config_file_round_trip() {
    let config = ConfigRbox::new()
        .with_method(IouMethod::Box)
        .with_iou(0.25)
        .with_profile(true);
    let path = std::env::temp_dir().join(format!("bvr_rbox_config_{}.json", std::process::id()));
    std::fs::write(&path, config.to_json_string().unwrap()).unwrap();

    let loaded = ConfigRbox::from_json_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(loaded, config);

    assert!(ConfigRbox::from_json_file(path.with_extension("missing")).is_err());
}

#[test]
fn threshold_is_clamped() {
    assert_eq!(ConfigRbox::new().with_iou(1.5).iou_threshold, 1.0);
    assert_eq!(ConfigRbox::new().with_iou(-0.2).iou_threshold, 0.0);
    assert_eq!(ConfigRbox::new().with_iou(f32::NAN).iou_threshold, DEFAULT_IOU_THRESHOLD);
}

#[test]
fn runner_records_timings() {
    let mut runner = RboxRunner::new(ConfigRbox::new().with_profile(true)).unwrap();
    assert_eq!(runner.device(), ComputeDevice::Reference);

    let boxes = array![
        [0f32, 0., 10., 10., 0.],
        [1., 1., 10., 10., 0.],
        [50., 50., 10., 10., 0.],
    ];
    let iou = runner.iou(boxes.view(), boxes.view()).unwrap();
    assert_eq!(iou.shape(), &[3, 3]);
    assert_eq!(runner.nms(boxes.view()).unwrap(), vec![0, 2]);

    let scores = array![0.1f32, 0.9, 0.5];
    assert_eq!(runner.nms_scored(boxes.view(), scores.view()).unwrap(), vec![1, 2]);

    assert_eq!(runner.time.n(), 3);
    assert_eq!(runner.time.ts().len(), 2);
    assert!(runner.time.total() >= runner.time.ts()[1]);
}

#[test]
fn runner_errors_leave_timings_untouched() {
    let mut runner = RboxRunner::new(ConfigRbox::new()).unwrap();
    let negative = array![[0f32, 0., -1., 1., 0.]];
    assert!(matches!(runner.nms(negative.view()), Err(RboxError::InvalidShape { .. })));
    assert_eq!(runner.time.n(), 0);
}

#[cfg(feature = "accelerated")]
#[test]
fn accelerated_runner_matches_reference() {
    let boxes = bvr_rbox::common::BoxSet::random(200, 60., 17).to_array();
    let mut reference = RboxRunner::new(ConfigRbox::new().with_iou(0.3)).unwrap();
    let mut accelerated =
        RboxRunner::new(ConfigRbox::new().with_iou(0.3).with_device(ComputeDevice::Accelerated(2))).unwrap();

    assert_eq!(accelerated.device(), ComputeDevice::Accelerated(2));
    assert_eq!(reference.nms(boxes.view()).unwrap(), accelerated.nms(boxes.view()).unwrap());
}

#[cfg(not(feature = "accelerated"))]
#[test]
fn accelerated_runner_is_unavailable() {
    let config = ConfigRbox::new().with_device(ComputeDevice::Accelerated(0));
    assert!(matches!(RboxRunner::new(config), Err(RboxError::DeviceUnavailable(_))));
}
