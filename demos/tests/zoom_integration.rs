//! End-to-end zoom-training tests over the full stack.
//!
//! These drive the real simulated-annealing sampler through `Model::train`
//! on small seeded problems and check the recorded results.

use ndarray::array;

use qamlz_adapter_sa::SimulatedAnnealer;
use qamlz_demos::dataset::separable_dataset;
use qamlz_train::{Model, ModelConfig, TrainEnv};

/// Smallest end-to-end case: a 1-dimensional environment with `C_i = [1]`,
/// `C_ij = [[0]]`, and one training example whose label matches
/// `sign(mu)`. One iteration of the full default pipeline (pruning and QAC
/// enabled) must reach accuracy 1.0, keyed for iteration 0.
#[tokio::test]
async fn test_trivial_environment_single_iteration() {
    let env = TrainEnv::from_parts(
        array![[1.0]],
        array![1.0],
        array![1.0],
        array![[0.0]],
        1,
    )
    .unwrap();
    let mut model = Model::with_seed(ModelConfig::new(1), env, 17).unwrap();

    model.train(&SimulatedAnnealer::new()).await.unwrap();

    assert_eq!(model.results().accuracy_for(0), Some(1.0));

    let key = model.results().weight_lists().keys().next().unwrap();
    assert!(
        key.starts_with("mus00001-1_iter0_run0__"),
        "unexpected key: {key}"
    );

    // Whatever the flip draws did, the lone weight stays positive: the
    // perturbation scale is 0.5 around mu = 1.
    let weights = model.results().weights_for(0).unwrap();
    assert_eq!(weights.len(), 1);
    assert_eq!(weights[0].len(), 1);
    assert!(weights[0][0] > 0.0);
}

#[tokio::test]
async fn test_separable_dataset_training() {
    let data = separable_dataset(64, 8, 0.0, 5);
    let env = TrainEnv::new(data.x, data.y, 2).unwrap();
    let mut model = Model::with_seed(ModelConfig::new(4), env, 9).unwrap();

    model.train(&SimulatedAnnealer::new()).await.unwrap();

    assert_eq!(model.results().num_iterations(), 4);
    let mut best: f64 = 0.0;
    for iteration in 0..4 {
        let acc = model.results().accuracy_for(iteration).unwrap();
        assert!((0.0..=1.0).contains(&acc));
        best = best.max(acc);
    }
    assert!(
        best > 0.5,
        "zoom training should beat chance on separable data, got {best}"
    );

    // Weight dimensionality is fixed for the entire run.
    for weights in model.results().weight_lists().values() {
        for mu in weights {
            assert_eq!(mu.len(), 8);
        }
    }
}

#[tokio::test]
async fn test_plain_pipeline_without_prune_or_qac() {
    let data = separable_dataset(32, 6, 0.1, 3);
    let env = TrainEnv::new(data.x, data.y, 2).unwrap();
    let config = ModelConfig::new(3).with_prune_cutoff(None).with_qac(None);
    let mut model = Model::with_seed(config, env, 21).unwrap();

    model.train(&SimulatedAnnealer::new()).await.unwrap();

    assert_eq!(model.results().num_iterations(), 3);
    assert_eq!(model.results().weight_lists().len(), 3);
    for key in model.results().weight_lists().keys() {
        assert!(key.starts_with("mus00032-2_iter"), "unexpected key: {key}");
    }
}

#[tokio::test]
async fn test_seeded_runs_reproducible_end_to_end() {
    let data = separable_dataset(24, 5, 0.0, 8);
    let env = TrainEnv::new(data.x, data.y, 1).unwrap();
    let config = ModelConfig::new(2);

    let mut first = Model::with_seed(config.clone(), env.clone(), 33).unwrap();
    let mut second = Model::with_seed(config, env, 33).unwrap();
    first.train(&SimulatedAnnealer::new()).await.unwrap();
    second.train(&SimulatedAnnealer::new()).await.unwrap();

    assert_eq!(first.results().accuracies(), second.results().accuracies());

    // Run keys embed the wall-clock start time; compare recorded weights
    // only.
    let first_weights: Vec<_> = first.results().weight_lists().values().collect();
    let second_weights: Vec<_> = second.results().weight_lists().values().collect();
    assert_eq!(first_weights, second_weights);
}
