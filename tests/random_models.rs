use hmm_dp::{joint_probability, Inference, Linear, LogSpace, Model, ProbSpace};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_distribution(rng: &mut StdRng, len: usize) -> Vec<f64> {
    let weights: Vec<f64> = (0..len).map(|_| rng.gen_range(0.01..1.0)).collect();
    let total: f64 = weights.iter().sum();
    weights.into_iter().map(|w| w / total).collect()
}

fn random_model(rng: &mut StdRng, n: usize, m: usize) -> Model {
    let transition = (0..=n)
        .map(|_| {
            let mut row = vec![0.0];
            row.extend(random_distribution(rng, n));
            row
        })
        .collect();
    let emission = (0..n).map(|_| random_distribution(rng, m)).collect();
    Model::new(
        (0..n).map(|i| format!("S{i}")),
        (0..m).map(|v| format!("{v}")),
        transition,
        emission,
    )
    .unwrap()
}

fn random_obs(rng: &mut StdRng, model: &Model, len: usize) -> Vec<String> {
    (0..len)
        .map(|_| model.symbols()[rng.gen_range(0..model.num_symbols())].clone())
        .collect()
}

fn best_by_enumeration(model: &Model, obs: &[String]) -> f64 {
    let n = model.num_states();
    let t = obs.len();
    let mut best = 0.0f64;
    for mut code in 0..n.pow(t as u32) {
        let path: Vec<&str> = (0..t)
            .map(|_| {
                let j = code % n;
                code /= n;
                model.state_label(j)
            })
            .collect();
        best = best.max(joint_probability(model, &path, obs).unwrap());
    }
    best
}

#[test]
fn viterbi_matches_enumeration_up_to_five_states() {
    let mut rng = StdRng::seed_from_u64(7);
    for n in 1..=5 {
        for _ in 0..10 {
            let m = rng.gen_range(1..=4);
            let model = random_model(&mut rng, n, m);
            let len = rng.gen_range(1..=5);
            let obs = random_obs(&mut rng, &model, len);

            let path = Inference::<Linear>::new(&model).viterbi(&obs).unwrap();
            let brute = best_by_enumeration(&model, &obs);
            assert!(
                (path.score - brute).abs() <= 1e-12 * brute,
                "n={n} obs={obs:?}: viterbi {} vs enumeration {brute}",
                path.score
            );
        }
    }
}

#[test]
fn log_space_tracks_linear_on_medium_sequences() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..20 {
        let n = rng.gen_range(2..=6);
        let m = rng.gen_range(2..=5);
        let model = random_model(&mut rng, n, m);
        let obs = random_obs(&mut rng, &model, 60);

        let linear = Inference::<Linear>::new(&model);
        let log = Inference::<LogSpace>::new(&model);
        let p = linear.forward(&obs).unwrap();
        let lp = log.forward(&obs).unwrap();
        assert!(p > 0.0);
        assert!((p.ln() - lp).abs() < 1e-8, "{} vs {lp}", p.ln());
        assert!((LogSpace::to_prob(lp) - p).abs() <= 1e-7 * p);

        let best = linear.viterbi(&obs).unwrap();
        let log_best = log.viterbi(&obs).unwrap();
        assert!((best.score.ln() - log_best.score).abs() < 1e-8);
        assert!(best.score <= p);
    }
}

#[test]
fn linear_underflows_where_log_space_does_not() {
    let mut rng = StdRng::seed_from_u64(99);
    let model = random_model(&mut rng, 3, 4);
    let obs = random_obs(&mut rng, &model, 2_000);

    assert_eq!(Inference::<Linear>::new(&model).forward(&obs).unwrap(), 0.0);
    let lp = Inference::<LogSpace>::new(&model).forward(&obs).unwrap();
    assert!(lp.is_finite() && lp < 0.0);

    let path = Inference::<LogSpace>::new(&model).viterbi(&obs).unwrap();
    assert_eq!(path.len(), obs.len());
    assert!(path.score.is_finite() && path.score <= lp);
}
