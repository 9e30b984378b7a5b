use crate::drivers::hamiltonian::IntegralSource;
use crate::interfaces::input::{HamiltonianInputKind, Input};
use crate::interfaces::InputHandle;
use crate::mapping::QubitMapping;

const FULL_CONFIG: &str = r#"
hamiltonian: !Parameters
  source: !Gaussian
    xyz: tests/xyz/h2.xyz
    basis_set: sto-3g
  mapping: Parity
  particle_hole: true
  two_qubit_reduction: true
exact_eigensolver:
  n_states: 2
vqe:
  depth: 1
  max_iterations: 64
"#;

const MINIMAL_CONFIG: &str = r#"
hamiltonian: !Parameters
  source: !FciDump
    path: tests/fcidump/h2.fcidump
"#;

#[test]
fn test_input_full_configuration() {
    let input: Input = serde_yaml::from_str(FULL_CONFIG).unwrap();
    let HamiltonianInputKind::Parameters(params) = &input.hamiltonian else {
        panic!("Expected explicit Hamiltonian parameters.");
    };
    assert!(matches!(params.source, IntegralSource::Gaussian { .. }));
    assert_eq!(params.mapping, QubitMapping::Parity);
    assert!(params.particle_hole);
    assert!(params.two_qubit_reduction);
    // Unspecified fields take their defaults.
    assert_eq!(params.truncation_threshold, 1e-12);
    assert!(params.result_save_name.is_none());

    let exact = input.exact_eigensolver.as_ref().unwrap();
    assert_eq!(exact.n_states, 2);
    assert_eq!(exact.max_qubits, 12);

    let vqe = input.vqe.as_ref().unwrap();
    assert_eq!(vqe.depth, 1);
    assert_eq!(vqe.max_iterations, 64);
    assert!(vqe.use_reference_state);
}

#[test]
fn test_input_minimal_configuration() {
    let input: Input = serde_yaml::from_str(MINIMAL_CONFIG).unwrap();
    let HamiltonianInputKind::Parameters(params) = &input.hamiltonian else {
        panic!("Expected explicit Hamiltonian parameters.");
    };
    assert_eq!(params.mapping, QubitMapping::JordanWigner);
    assert!(!params.particle_hole);
    assert!(input.exact_eigensolver.is_none());
    assert!(input.vqe.is_none());
}

#[test]
fn test_input_handle_end_to_end() {
    // Construction from the FCIDUMP fixture followed by exact diagonalisation.
    let config = r#"
hamiltonian: !Parameters
  source: !FciDump
    path: tests/fcidump/h2.fcidump
  mapping: BravyiKitaev
exact_eigensolver: {}
"#;
    let input: Input = serde_yaml::from_str(config).unwrap();
    input.handle().unwrap();
}

#[test]
fn test_input_rejects_unknown_mapping() {
    let config = r#"
hamiltonian: !Parameters
  source: !FciDump
    path: tests/fcidump/h2.fcidump
  mapping: Nonexistent
"#;
    assert!(serde_yaml::from_str::<Input>(config).is_err());
}
