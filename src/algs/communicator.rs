//! Thin façade over the process group the adapter runs in.
//!
//! The adapter is single-partition: it only needs to know how many
//! participants exist so that queries meaningful only in a distributed
//! setting can refuse to run when there is more than one.

/// Process-group interface.
pub trait Communicator {
    /// Rank of this participant.
    fn rank(&self) -> usize;
    /// Number of participants in the group.
    fn size(&self) -> usize;
}

/// Compile-time serial group: rank 0 of 1.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoComm;

impl Communicator for NoComm {
    fn rank(&self) -> usize {
        0
    }
    fn size(&self) -> usize {
        1
    }
}

/// Simulated group of `size` participants inside one process.
#[derive(Clone, Copy, Debug)]
pub struct LocalComm {
    rank: usize,
    size: usize,
}

impl LocalComm {
    /// # Panics
    /// Panics if `rank >= size`.
    pub fn new(rank: usize, size: usize) -> Self {
        assert!(rank < size, "rank {rank} outside group of {size}");
        Self { rank, size }
    }
}

impl Communicator for LocalComm {
    fn rank(&self) -> usize {
        self.rank
    }
    fn size(&self) -> usize {
        self.size
    }
}

// --- MPI backend (feature = "mpi-support") ---
#[cfg(feature = "mpi-support")]
mod mpi_backend {
    use super::Communicator;
    use mpi::topology::SimpleCommunicator;
    use mpi::traits::Communicator as _;

    /// `MPI_COMM_WORLD` of an initialized MPI universe.
    pub struct MpiComm {
        _universe: mpi::environment::Universe,
        world: SimpleCommunicator,
    }

    impl MpiComm {
        /// Initializes MPI; returns `None` if it was already initialized.
        pub fn new() -> Option<Self> {
            let universe = mpi::initialize()?;
            let world = universe.world();
            Some(Self {
                _universe: universe,
                world,
            })
        }
    }

    impl Communicator for MpiComm {
        fn rank(&self) -> usize {
            self.world.rank() as usize
        }
        fn size(&self) -> usize {
            self.world.size() as usize
        }
    }
}

#[cfg(feature = "mpi-support")]
pub use mpi_backend::MpiComm;
