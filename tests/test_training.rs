// Tests for the epoch driver: soft targets, per-epoch statistics and evaluation.

use neural_net::train::{evaluate, soft_target};
use neural_net::{train_loop, Dataset, Error, Matrix, NeuralNetwork, TrainConfig};

/// Two separable classes: bright-left vs bright-right "images".
fn toy_dataset() -> Dataset {
    let rows = vec![
        vec![0.9, 0.8, 0.1, 0.0],
        vec![0.1, 0.0, 0.9, 1.0],
        vec![1.0, 0.7, 0.0, 0.2],
        vec![0.0, 0.2, 0.8, 0.9],
    ];
    Dataset::new(Matrix::from_data(rows).unwrap(), vec![0, 1, 0, 1]).unwrap()
}

#[test]
fn soft_target_marks_label() {
    assert_eq!(soft_target(2, 4, 0.99, 0.1).unwrap(), vec![0.1, 0.1, 0.99, 0.1]);
    assert!(matches!(soft_target(4, 4, 0.99, 0.1), Err(Error::InvalidParameter(_))));
}

#[test]
fn train_config_defaults() {
    let config = TrainConfig::default();
    assert_eq!(config.epochs, 10);
    assert_eq!(config.on_target, 0.99);
    assert_eq!(config.off_target, 0.1);

    let parsed: TrainConfig = serde_json::from_str(r#"{"epochs": 3}"#).unwrap();
    assert_eq!(parsed, TrainConfig::new(3));
}

#[test]
fn records_one_entry_per_epoch() {
    let dataset = toy_dataset();
    let mut nn = NeuralNetwork::new(4, 3, 2, 0.3).unwrap();

    let history = train_loop(&mut nn, &dataset, &TrainConfig::new(5)).unwrap();

    assert_eq!(history.len(), 5);
    for (i, stats) in history.iter().enumerate() {
        assert_eq!(stats.epoch, i + 1);
        assert_eq!(stats.total_epochs, 5);
        assert_eq!(stats.peak_confidence.len(), 2);
        assert!(stats.peak_confidence.iter().all(|&c| c > 0.0 && c < 1.0));
        assert!((0.0..=1.0).contains(&stats.train_accuracy));
        assert!(stats.train_loss.is_finite());
    }
}

#[test]
fn loss_falls_and_classes_separate() {
    let dataset = toy_dataset();
    let mut nn = NeuralNetwork::new(4, 3, 2, 0.3).unwrap();

    let history = train_loop(&mut nn, &dataset, &TrainConfig::new(300)).unwrap();

    let first = history.first().unwrap().train_loss;
    let last = history.last().unwrap().train_loss;
    assert!(last < first, "{} -> {}", first, last);
    assert_eq!(evaluate(&nn, &dataset).unwrap(), 1.0);
}

#[test]
fn runs_are_reproducible() {
    let dataset = toy_dataset();
    let mut a = NeuralNetwork::new(4, 3, 2, 0.3).unwrap();
    let mut b = NeuralNetwork::new(4, 3, 2, 0.3).unwrap();

    let ha = train_loop(&mut a, &dataset, &TrainConfig::new(3)).unwrap();
    let hb = train_loop(&mut b, &dataset, &TrainConfig::new(3)).unwrap();

    assert_eq!(a, b);
    let losses = |h: &[neural_net::EpochStats]| h.iter().map(|s| s.train_loss).collect::<Vec<_>>();
    assert_eq!(losses(&ha), losses(&hb));
}

#[test]
fn label_out_of_range_fails() {
    let dataset = Dataset::new(toy_dataset().inputs().clone(), vec![0, 5, 0, 1]).unwrap();
    let mut nn = NeuralNetwork::new(4, 3, 2, 0.3).unwrap();

    assert!(train_loop(&mut nn, &dataset, &TrainConfig::new(1)).is_err());
}

#[test]
fn empty_dataset_fails() {
    let dataset = Dataset::new(Matrix::zeros(0, 4), vec![]).unwrap();
    let mut nn = NeuralNetwork::new(4, 3, 2, 0.3).unwrap();

    assert!(train_loop(&mut nn, &dataset, &TrainConfig::new(1)).is_err());
    assert_eq!(evaluate(&nn, &dataset).unwrap(), 0.0);
}

#[test]
fn label_count_must_match_input_rows() {
    let err = Dataset::new(Matrix::zeros(1, 2), vec![0, 1]).unwrap_err();
    assert!(matches!(err, Error::InvalidParameter(_)));
}
