use std::{
    fs,
    path::PathBuf,
    sync::atomic::{AtomicUsize, Ordering},
};

// Tests in the same binary run in parallel, so the existence check alone
// is not enough.
static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn test_temp_dir_path() -> PathBuf {
    let tmpdir = std::env::temp_dir();
    let prefix = format!(
        "washsale-test-{}-{}",
        std::process::id(),
        DIR_COUNTER.fetch_add(1, Ordering::SeqCst)
    );

    let make_file_path = |val| {
        let fname = format!("{}-{}", prefix, val);
        tmpdir.join(fname)
    };

    for val in 1..1000000 {
        let path = make_file_path(val);
        if !path.exists() {
            return path;
        }
    }
    panic!("Could not create temp directory path that does not already exist");
}

pub fn sample_file_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data").join(name)
}

// A temp dir path which does not exist yet. The test (or code under test)
// is expected to create it. It is removed when dropped.
pub struct NonAutoCreatingTestDir {
    pub path: PathBuf
}

impl NonAutoCreatingTestDir {
    pub fn new() -> NonAutoCreatingTestDir {
        NonAutoCreatingTestDir{path: test_temp_dir_path()}
    }
}

fn cleanup_test_dir(path: &PathBuf) {
    if path.exists() {
        let skip_env_var = "SKIP_TEMP_DIR_CLEANUP_ON_FAIL";
        let skip_del_on_fail = washsale::util::sys::env_var_non_empty(skip_env_var);

        if std::thread::panicking() && skip_del_on_fail {
            println!("cleanup_test_dir: panicking. Skipping remove of {}",
                     path.display());
        } else {
            println!("cleanup_test_dir: removing {}. To skip cleanup, set {}",
                     path.display(), skip_env_var);
            let _ = fs::remove_dir_all(path);
        }
    } else {
        println!("cleanup_test_dir: {} did not exist", path.display());
    }
}

impl Drop for NonAutoCreatingTestDir {
    fn drop(&mut self) {
        cleanup_test_dir(&self.path);
    }
}