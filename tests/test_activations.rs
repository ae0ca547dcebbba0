// Tests for the scalar activations, their derivatives and the matrix mappers.

use approx::assert_relative_eq;
use neural_net::activation::activation::{
    apply_in_place, apply_new, leaky_relu, leaky_relu_derivative, relu, relu_derivative, sigmoid,
    sigmoid_derivative, tanh, tanh_derivative,
};
use neural_net::{ActivationFunction, Matrix};

#[cfg(test)]
mod scalar_functions {
    use super::*;

    #[test]
    fn sigmoid_values() {
        assert_relative_eq!(sigmoid(0.0), 0.5, epsilon = 1e-12);
        assert_relative_eq!(sigmoid(2.0), 0.8807970779778823, epsilon = 1e-12);
        assert_relative_eq!(sigmoid(-2.0), 0.11920292202211755, epsilon = 1e-12);
        assert_relative_eq!(sigmoid_derivative(0.0), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn relu_values() {
        assert_eq!(relu(3.0), 3.0);
        assert_eq!(relu(-3.0), 0.0);
        assert_eq!(relu_derivative(3.0), 1.0);
        assert_eq!(relu_derivative(-3.0), 0.0);
        assert_eq!(relu_derivative(0.0), 0.0);
    }

    #[test]
    fn tanh_values() {
        assert_relative_eq!(tanh(0.0), 0.0, epsilon = 1e-12);
        assert_relative_eq!(tanh(1.0), 0.7615941559557649, epsilon = 1e-12);
        assert_relative_eq!(tanh_derivative(0.0), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn leaky_relu_values() {
        assert_eq!(leaky_relu(2.0), 2.0);
        assert_relative_eq!(leaky_relu(-2.0), -0.02, epsilon = 1e-12);
        assert_eq!(leaky_relu_derivative(2.0), 1.0);
        assert_eq!(leaky_relu_derivative(-2.0), 0.01);
    }
}

#[cfg(test)]
mod derivatives {
    use super::*;

    fn numerical(act: ActivationFunction, x: f64) -> f64 {
        let h = 1e-6;
        (act.function(x + h) - act.function(x - h)) / (2.0 * h)
    }

    #[test]
    fn analytical_matches_numerical() {
        let all = [
            ActivationFunction::Sigmoid,
            ActivationFunction::ReLU,
            ActivationFunction::Tanh,
            ActivationFunction::LeakyReLU,
        ];
        // Avoid the kink at 0 for the piecewise functions.
        for act in all {
            for &x in &[-3.0, -0.7, 0.2, 1.5, 4.0] {
                assert_relative_eq!(act.derivative(x), numerical(act, x), max_relative = 1e-4);
            }
        }
    }

    #[test]
    fn sigmoid_output_shortcut() {
        let y = sigmoid(0.8);
        assert_eq!(ActivationFunction::Sigmoid.derivative_from_output(y), y * (1.0 - y));
    }
}

#[cfg(test)]
mod mapping {
    use super::*;

    #[test]
    fn apply_new_leaves_source_untouched() {
        let source = Matrix::from_data(vec![vec![0.0, 1.0], vec![-1.0, 2.0]]).unwrap();

        let mapped = apply_new(&source, sigmoid);

        assert_eq!(source.get(1, 0), -1.0);
        assert_eq!(mapped.shape(), source.shape());
        assert_relative_eq!(mapped.get(0, 0), 0.5, epsilon = 1e-12);
        assert_relative_eq!(mapped.get(1, 1), sigmoid(2.0), epsilon = 1e-12);
    }

    #[test]
    fn apply_in_place_visits_every_element() {
        let mut target = Matrix::from_data(vec![vec![-1.0, 2.0, -3.0], vec![4.0, -5.0, 6.0]]).unwrap();

        apply_in_place(&mut target, relu);

        assert_eq!(
            target,
            Matrix::from_data(vec![vec![0.0, 2.0, 0.0], vec![4.0, 0.0, 6.0]]).unwrap()
        );
    }
}
