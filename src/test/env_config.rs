use crate::error::FlowSchedError;
use crate::sim::{DEFAULT_FLOW_SIZE, EnvConfig, FlowSize, seed_rng};

#[test]
fn empty_json_yields_default_diamond_config() {
    let cfg = EnvConfig::from_json_str("{}").expect("parse config");
    assert_eq!(cfg, EnvConfig::default());
    assert_eq!(cfg.n_links(), 6);
    assert_eq!(cfg.n_states, 20);
    assert_eq!(cfg.n_flows, 10);
    assert_eq!(cfg.n_buckets, 5);
    assert_eq!(
        cfg.flow_size,
        FlowSize::Fixed {
            size: DEFAULT_FLOW_SIZE
        }
    );
    assert_eq!(cfg.reset_weight, 0.5);
}

#[test]
fn partial_json_overrides_only_given_fields() {
    let raw = r#"
    {
        "n_flows": 4,
        "paths": [[1, 1, 0], [0, 1, 1]],
        "flow_size": { "kind": "uniform", "min": 2.0, "max": 10.0 },
        "weight": { "sigma": 0.5 }
    }
    "#;
    let cfg = EnvConfig::from_json_str(raw).expect("parse config");
    assert_eq!(cfg.n_flows, 4);
    assert_eq!(cfg.n_states, 20);
    assert_eq!(cfg.n_links(), 3);
    assert_eq!(cfg.flow_size, FlowSize::Uniform { min: 2.0, max: 10.0 });
    assert_eq!(cfg.weight.sigma, 0.5);
    assert_eq!(cfg.weight.mu, 0.2);
}

#[test]
fn unknown_fields_and_bad_values_are_rejected() {
    assert!(matches!(
        EnvConfig::from_json_str(r#"{ "n_link": 6 }"#),
        Err(FlowSchedError::Json(_))
    ));
    assert!(matches!(
        EnvConfig::from_json_str(r#"{ "n_flows": 0 }"#),
        Err(FlowSchedError::Config(_))
    ));
    assert!(matches!(
        EnvConfig::from_json_str(r#"{ "paths": [[1, 0], [1]] }"#),
        Err(FlowSchedError::Config(_))
    ));
    assert!(matches!(
        EnvConfig::from_json_str(r#"{ "flow_size": { "kind": "fixed", "size": -1.0 } }"#),
        Err(FlowSchedError::Config(_))
    ));
    assert!(matches!(
        EnvConfig::from_json_str(r#"{ "n_states": 2, "initial_state_dist": [0.2, 0.2] }"#),
        Err(FlowSchedError::DistributionSum { .. })
    ));
}

#[test]
fn uniform_flow_sizes_stay_in_range() {
    let (mut rng, _) = seed_rng(Some(8));
    let size = FlowSize::Uniform { min: 2.0, max: 10.0 };
    for _ in 0..1000 {
        let s = size.sample(&mut rng);
        assert!((2.0..10.0).contains(&s));
    }
    let fixed = FlowSize::Fixed { size: 3.0 };
    assert_eq!(fixed.sample(&mut rng), 3.0);
}

#[test]
fn default_initial_distribution_is_uniform() {
    let cfg = EnvConfig::default();
    let isd = cfg.initial_distribution();
    assert_eq!(isd.len(), 20);
    assert!(isd.iter().all(|&p| p == 0.05));
}
