use super::*;
use crate::config::params::WaveDirection;

fn quiet() -> ParameterSet {
    ParameterSet {
        pixelation_level: 0,
        color_invert_period: 0,
        wave_amplitude: 0.0,
        wave_direction: WaveDirection::None,
        blur_radius: 0.0,
        hue_speed: 0.0,
        ..ParameterSet::default()
    }
}

#[test]
fn disabled_params_build_an_empty_chain() {
    let chain = PostFxChain::from_params(&quiet());
    assert!(chain.is_empty());

    let r = Raster::filled(5, 5, [1, 2, 3, 4]);
    assert_eq!(chain.apply(r.clone(), FrameIndex(3), 0.5).unwrap(), r);
}

#[test]
fn pixelation_level_one_is_dropped() {
    let p = ParameterSet {
        pixelation_level: 1,
        ..quiet()
    };
    assert!(PostFxChain::from_params(&p).is_empty());
}

#[test]
fn hue_needs_speed_and_intensity() {
    let p = ParameterSet {
        hue_speed: 5.0,
        hue_intensity: 0.0,
        ..quiet()
    };
    assert!(PostFxChain::from_params(&p).is_empty());
}

#[test]
fn stages_follow_the_fixed_order() {
    let p = ParameterSet {
        pixelation_level: 4,
        color_invert_period: 3,
        wave_amplitude: 2.0,
        wave_frequency: 0.5,
        wave_direction: WaveDirection::Vertical,
        blur_radius: 1.5,
        hue_speed: 7.0,
        hue_intensity: 1.2,
        ..quiet()
    };
    let names: Vec<&str> = PostFxChain::from_params(&p)
        .passes
        .iter()
        .map(PostFx::name)
        .collect();
    assert_eq!(names, vec!["pixelate", "wave", "hue", "invert", "blur"]);
}

#[test]
fn invert_stage_fires_only_on_period_frames() {
    let p = ParameterSet {
        color_invert_period: 2,
        ..quiet()
    };
    let chain = PostFxChain::from_params(&p);
    let r = Raster::filled(2, 2, [10, 20, 30, 255]);

    let f0 = chain.apply(r.clone(), FrameIndex(0), 0.0).unwrap();
    let f1 = chain.apply(r.clone(), FrameIndex(1), 0.1).unwrap();
    assert_eq!(f0.pixel(0, 0), [245, 235, 225, 255]);
    assert_eq!(f1, r);
}
