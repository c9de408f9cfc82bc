use proptest::prelude::*;
use serde_json::json;
use simkit_core::{run_simulation_value, Status};

fn sir(beta: f64, gamma: f64, s: f64, i: f64, r: f64, steps: usize) -> serde_json::Value {
    json!({
        "model_type": "SIR",
        "parameters": { "beta": beta, "gamma": gamma },
        "initial_conditions": { "S": s, "I": i, "R": r },
        "time_span": { "start": 0.0, "end": 50.0, "steps": steps }
    })
}

fn logistic(r: f64, k: f64, p: f64, steps: usize) -> serde_json::Value {
    json!({
        "model_type": "Logistic",
        "parameters": { "r": r, "K": k },
        "initial_conditions": { "P": p },
        "time_span": { "start": 0.0, "end": 50.0, "steps": steps }
    })
}

proptest! {
    #[test]
    fn row_count_and_initial_row(
        steps in 1usize..300,
        start in -50.0f64..50.0,
        len in 0.5f64..10.0,
    ) {
        let config = json!({
            "model_type": "Logistic",
            "parameters": { "r": 0.2, "K": 100.0 },
            "initial_conditions": { "P": 5.0 },
            "time_span": { "start": start, "end": start + len, "steps": steps }
        });
        let result = run_simulation_value(&config);
        prop_assert_eq!(result.status, Status::Success);
        prop_assert_eq!(result.data.len(), steps + 1);
        prop_assert!((result.data[0]["t"] - start).abs() <= 0.005 + 1e-9);
        prop_assert_eq!(result.data[0]["P"], 5.0);
    }

    #[test]
    fn sir_conserves_total_population(
        beta in 0.0f64..1.0,
        gamma in 0.0f64..1.0,
        s in 0.0f64..1.0,
        i in 0.001f64..1.0,
        r in 0.0f64..1.0,
        steps in 100usize..300,
    ) {
        let result = run_simulation_value(&sir(beta, gamma, s, i, r, steps));
        prop_assert_eq!(result.status, Status::Success);
        let total = s + i + r;
        for row in &result.data {
            let sum = row["S"] + row["I"] + row["R"];
            prop_assert!((sum - total).abs() < 1e-3, "sum {} drifted from {}", sum, total);
        }
    }

    #[test]
    fn logistic_growth_is_monotone_and_bounded(
        rate in 0.01f64..0.5,
        k in 10.0f64..10_000.0,
        frac in 0.01f64..0.99,
        steps in 100usize..200,
    ) {
        let result = run_simulation_value(&logistic(rate, k, k * frac, steps));
        prop_assert_eq!(result.status, Status::Success);
        let values = result.column("P");
        prop_assert!(values.windows(2).all(|w| w[1] >= w[0]));
        prop_assert!(values.iter().all(|&p| p <= k + 0.01));
    }

    #[test]
    fn logistic_overshoot_decays_toward_capacity(
        rate in 0.01f64..0.5,
        k in 10.0f64..10_000.0,
        factor in 1.01f64..3.0,
        steps in 100usize..200,
    ) {
        let result = run_simulation_value(&logistic(rate, k, k * factor, steps));
        prop_assert_eq!(result.status, Status::Success);
        let values = result.column("P");
        prop_assert!(values.windows(2).all(|w| w[1] <= w[0]));
        prop_assert!(values.iter().all(|&p| p >= k - 0.01));
    }

    #[test]
    fn projectile_apex_is_halfway(velocity in 10.0f64..100.0, angle in 20.0f64..80.0) {
        let g = 9.81;
        let flight = 2.0 * velocity * angle.to_radians().sin() / g;
        let end = 1.2 * flight;
        let steps = 200;
        let config = json!({
            "model_type": "Projectile",
            "parameters": { "velocity": velocity, "angle": angle, "g": g },
            "initial_conditions": { "x": 0.0, "y": 0.0 },
            "time_span": { "start": 0.0, "end": end, "steps": steps }
        });
        let result = run_simulation_value(&config);
        prop_assert_eq!(result.status, Status::Success);
        let dt = end / steps as f64;
        let t_apex = result.metric("t_apex").unwrap();
        let measured = result.metric("flight_time").unwrap();
        prop_assert!((t_apex - measured / 2.0).abs() <= 2.0 * dt + 0.02);
        prop_assert!((measured - flight).abs() <= dt + 0.01);
    }

    #[test]
    fn identical_configs_give_identical_results(beta in 0.05f64..1.0, gamma in 0.05f64..1.0) {
        let config = sir(beta, gamma, 0.99, 0.01, 0.0, 120);
        prop_assert_eq!(run_simulation_value(&config), run_simulation_value(&config));
    }
}
