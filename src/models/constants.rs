/// Branch holding the checkpoint registry document, isolated from checkpoint content.
pub const CONFIG_BRANCH: &str = "tut";

/// File name of the registry document at the root of [`CONFIG_BRANCH`].
pub const CONFIG_FILE: &str = "tut.cfg";

/// Prefix of the scratch branch opened by `edit`; the checkpoint name follows it.
pub const SCRATCH_PREFIX: &str = "tut-edit/";

/// Main-line branch assumed when the repository is detached at `init`.
pub const DEFAULT_HEAD: &str = "master";

/// Directory under the git dir for tut's transient state.
pub const STATE_DIR: &str = "tut";

/// Propagation journal file name inside [`STATE_DIR`].
pub const JOURNAL_FILE: &str = "propagation.yml";

/// Commit messages written by tut itself.
pub mod messages {
    pub const INITIAL_COMMIT: &str = "Initializing empty Tut project.";
    pub const INITIAL_CONFIG: &str = "Initializing Tut configuration.";

    pub fn new_point(name: &str) -> String {
        format!("Adding new point {name}")
    }

    pub fn edit_commit(name: &str) -> String {
        format!("Edit checkpoint {name}")
    }

    pub fn checkpoint_commit(name: &str) -> String {
        format!("Checkpoint {name}")
    }
}
