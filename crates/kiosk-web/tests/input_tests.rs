// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;
use kiosk_core::Viewport;
use std::time::Duration;

#[test]
fn backing_size_scales_by_device_pixel_ratio() {
    assert_eq!(backing_size(400.0, 300.0, 2.0), (800, 600));
    assert_eq!(backing_size(401.5, 300.0, 1.0), (401, 300));
}

#[test]
fn backing_size_never_collapses_to_zero() {
    assert_eq!(backing_size(0.0, 0.0, 2.0), (1, 1));
    assert_eq!(backing_size(-10.0, 50.0, 1.0), (1, 50));
}

#[test]
fn viewport_from_rect_keeps_offsets() {
    let vp = viewport_from_rect(12.0, 34.0, 640.0, 480.0);
    assert_eq!(vp.left, 12.0);
    assert_eq!(vp.top, 34.0);
    assert_eq!(vp.width, 640.0);
    assert_eq!(vp.height, 480.0);
}

#[test]
fn viewport_from_rect_clamps_negative_sizes() {
    let vp = viewport_from_rect(0.0, 0.0, -5.0, -1.0);
    assert_eq!(vp.width, 0.0);
    assert_eq!(vp.height, 0.0);
}

#[test]
fn frame_dt_is_capped() {
    let cap = Duration::from_millis(constants::MAX_FRAME_DT_MS);
    assert_eq!(clamp_frame_dt(Duration::from_millis(16)), Duration::from_millis(16));
    assert_eq!(clamp_frame_dt(Duration::from_secs(5)), cap);
}

#[test]
fn wheel_steps_follow_delta_mode() {
    assert_eq!(wheel_steps(100.0, 0), 1.0);
    assert_eq!(wheel_steps(-250.0, 0), -2.5);
    assert_eq!(wheel_steps(3.0, 1), 1.0);
    assert_eq!(wheel_steps(-1.0, 2), -1.0);
}

#[test]
fn box_style_offsets_by_viewport_origin() {
    let vp = Viewport {
        left: 10.0,
        top: 20.0,
        width: 800.0,
        height: 600.0,
    };
    let css = box_style(&vp, Vec2::new(5.0, 7.5), Vec2::new(220.0, 140.0));
    assert_eq!(css, "left:15.0px;top:27.5px;width:220.0px;height:140.0px;");
}
