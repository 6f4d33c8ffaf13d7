use serde::{Deserialize, Serialize};

use crate::math::shape_error::ShapeError;

/// An input sequence and the target output for each of its timesteps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub inputs: Vec<f64>,
    pub targets: Vec<f64>,
}

impl TrainingExample {
    pub fn new(inputs: Vec<f64>, targets: Vec<f64>) -> Result<TrainingExample, ShapeError> {
        if inputs.len() != targets.len() {
            return Err(ShapeError::SequenceLength {
                inputs: inputs.len(),
                targets: targets.len(),
            });
        }
        Ok(TrainingExample { inputs, targets })
    }

    /// Target of the last timestep, the value the final prediction is judged by.
    pub fn final_target(&self) -> Option<f64> {
        self.targets.last().copied()
    }

    /// Reads a JSON array of `{"inputs": [...], "targets": [...]}` objects.
    pub fn load_json(path: &str) -> std::io::Result<Vec<TrainingExample>> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let examples: Vec<TrainingExample> = serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        for example in &examples {
            if example.inputs.len() != example.targets.len() {
                let err = ShapeError::SequenceLength {
                    inputs: example.inputs.len(),
                    targets: example.targets.len(),
                };
                return Err(std::io::Error::new(std::io::ErrorKind::InvalidData, err));
            }
        }
        Ok(examples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("feedback_nn_{name}_{}.json", std::process::id()))
    }

    #[test]
    fn new_requires_matching_lengths() {
        assert!(TrainingExample::new(vec![1.0, 0.0], vec![1.0, 1.0]).is_ok());
        assert_eq!(
            TrainingExample::new(vec![1.0, 0.0], vec![1.0]).unwrap_err(),
            ShapeError::SequenceLength { inputs: 2, targets: 1 }
        );
    }

    #[test]
    fn load_json_reads_example_list() {
        let path = temp_path("examples_ok");
        let path = path.to_str().unwrap();
        std::fs::write(path, r#"[{"inputs":[0,1],"targets":[0,1]},{"inputs":[1],"targets":[1]}]"#).unwrap();

        let examples = TrainingExample::load_json(path).unwrap();
        std::fs::remove_file(path).unwrap();

        assert_eq!(examples.len(), 2);
        assert_eq!(examples[0].inputs, vec![0.0, 1.0]);
        assert_eq!(examples[1].final_target(), Some(1.0));
    }

    #[test]
    fn load_json_rejects_mismatched_example() {
        let path = temp_path("examples_mismatch");
        let path = path.to_str().unwrap();
        std::fs::write(path, r#"[{"inputs":[0,1],"targets":[0,1]},{"inputs":[1,1,0],"targets":[1]}]"#).unwrap();

        let err = TrainingExample::load_json(path).unwrap_err();
        std::fs::remove_file(path).unwrap();

        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
        let inner = err.get_ref().and_then(|e| e.downcast_ref::<ShapeError>());
        assert_eq!(inner, Some(&ShapeError::SequenceLength { inputs: 3, targets: 1 }));
    }

    #[test]
    fn load_json_rejects_malformed_json() {
        let path = temp_path("examples_malformed");
        let path = path.to_str().unwrap();
        std::fs::write(path, r#"[{"inputs":[0,1]}]"#).unwrap();

        let err = TrainingExample::load_json(path).unwrap_err();
        std::fs::remove_file(path).unwrap();

        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }
}
