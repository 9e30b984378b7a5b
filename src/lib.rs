//! # QFerm: fermionic Hamiltonians, qubit mappings and ground-state estimation
//!
//! QFerm is a program for the construction of second-quantized fermionic Hamiltonians from
//! molecular integrals and their study on simulated quantum hardware, with the following
//! capabilities:
//! - analytic one- and two-electron integrals over contracted s-type Gaussians followed by a
//!   restricted Hartree-Fock calculation, or integrals imported from `FCIDUMP` files,
//! - the particle-hole transformation against the Hartree-Fock reference determinant,
//! - the Jordan-Wigner, parity and Bravyi-Kitaev fermion-to-qubit mappings, with the optional
//!   removal of the two parity-symmetry qubits,
//! - exact ground-state computation by dense Hermitian diagonalisation, and
//! - the variational quantum eigensolver with a hardware-efficient trial circuit on a
//!   statevector simulator.
//!
//! This documentation details the public API of the `qferm` crate.
//!
//! ## Linear algebra backend
//!
//! There are six features defining six different ways a linear algebra backend can be
//! configured for QFerm. These are inherited from the
//! [`ndarray-linalg`](https://docs.rs/ndarray-linalg/latest/ndarray_linalg/) crate. One
//! (and only one) of these must be enabled:
//! - `openblas-static`: Downloads, builds OpenBLAS, and links statically
//! - `openblas-system`: Finds and links existing OpenBLAS in the system
//! - `netlib-static`: Downloads, builds LAPACK, and links statically
//! - `netlib-system`: Finds and links existing LAPACK in the system
//! - `intel-mkl-static`: Finds and links existing static Intel MKL in the system, or downloads
//!   and links statically if not found
//! - `intel-mkl-system`: Finds and links existing shared Intel MKL in the system
//!
//! The composite `standard` feature enables `openblas-static`.
//!
//! ## License
//!
//! GNU Lesser General Public License v3.0.

pub mod auxiliary;
pub mod basis;
pub mod drivers;
pub mod fermion;
pub mod integrals;
pub mod interfaces;
pub mod io;
pub mod mapping;
pub mod qubit;
pub mod scf;
pub mod simulator;
