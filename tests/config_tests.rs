//! Process-wide config. Lives in its own test binary so nothing else
//! installs or reads the global first.

use lazyseq::engine_core::config::{self, EngineConfig};
use lazyseq::prelude::*;

#[test]
fn test_install_after_implicit_global_use() {
    // Keyed operators and materializers read the global before any install.
    let distinct = from_vec(vec![3, 1, 3, 2]).distinct().to_vec().unwrap();
    assert_eq!(distinct, vec![3, 1, 2]);

    let capped = EngineConfig::default().with_max_materialized(3);
    assert_eq!(config::install(capped.clone()), Ok(()));
    assert_eq!(config::global(), &capped);

    assert_eq!(range(1, 3).to_vec(), Ok(vec![1, 2, 3]));
    assert_eq!(
        range_from(0).to_vec(),
        Err(Error::MaterializeLimit {
            op: "to_vec",
            limit: 3
        })
    );

    let second = config::install(EngineConfig::default());
    assert!(matches!(second, Err(Error::Config(_))));
    assert_eq!(config::global().max_materialized, Some(3));
}
