use neural_net::{NetworkSpec, NeuralNetwork};

fn main() -> neural_net::Result<()> {
    let mut network = NeuralNetwork::from_spec(&NetworkSpec::new(2, 4, 1, 0.5).with_seed(7))?;

    let inputs = vec![
        vec![1.0, 0.0],
        vec![1.0, 1.0],
        vec![0.0, 1.0],
        vec![0.0, 0.0],
    ];
    let expected_outputs = vec![
        vec![0.99],
        vec![0.1],
        vec![0.99],
        vec![0.1],
    ];

    let epochs = 10000;

    for epoch in 0..epochs {
        let mut loss = 0.0;
        for (input, expected) in inputs.iter().zip(&expected_outputs) {
            let output = network.train(input, expected)?;
            loss += (expected[0] - output.get(0, 0)).powi(2);
        }
        if epoch % 1000 == 0 {
            println!("Epoch {epoch}: loss = {:.6}", loss / inputs.len() as f64);
        }
    }

    for input in &inputs {
        println!("Input: {:?} -> Output: {:.4}", input, network.query(input)?.get(0, 0));
    }
    Ok(())
}
