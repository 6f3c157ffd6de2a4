//! On-disk fixture: a small slice of the Mammalian Phenotype ontology.
//!
//! ```text
//! MP:0000001 (1)                                 root
//! +-- MP:0005385 (2) cardiovascular system phenotype
//! |   +-- MP:0002127 (3) abnormal cardiovascular system morphology
//! |   |   +-- MP:0000266 (4) abnormal heart morphology
//! |   |       +-- MP:0004084 (7) abnormal cardiac muscle contractility
//! |   |           +-- MP:0005598 (12) decreased ventricle muscle contractility
//! |   +-- MP:0001544 (6) abnormal cardiovascular system physiology
//! |       +-- MP:0004084 (8)
//! |       |   +-- MP:0005598 (13)
//! |       +-- MP:0003137 (9) abnormal impulse conducting system conduction
//! +-- MP:0005376 (5) homeostasis/metabolism phenotype
//! ```

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use ontograph_core::Config;
use tempfile::TempDir;

pub const TERMS: &str = "\
term_id\tnodes\tname\tdefinition\talt_ids
MP:0000001\t1\tmammalian phenotype\tthe observable morphological, physiological, behavioral and other characteristics of mammalian organisms\t
MP:0005385\t2\tcardiovascular system phenotype\tthe observable morphological and physiological characteristics of the mammalian heart, blood vessels, or circulatory system\t
MP:0002127\t3\tabnormal cardiovascular system morphology\tany structural anomaly of the heart or blood vessels\t
MP:0000266\t4\tabnormal heart morphology\tany structural anomaly of the heart\tMP:0002126
MP:0005376\t5\thomeostasis/metabolism phenotype\tthe observable characteristics of the maintenance of a stable internal environment\t
MP:0001544\t6\tabnormal cardiovascular system physiology\tany functional anomaly of the heart or blood vessels\t
MP:0004084\t7,8\tabnormal cardiac muscle contractility\tanomaly in the ability of the heart muscle to shorten\t
MP:0003137\t9\tabnormal impulse conducting system conduction\tanomaly in the conduction of the cardiac impulse\t
MP:0005598\t12,13\tdecreased ventricle muscle contractility\treduced ability of the ventricular muscle to shorten\tMP:0005599,MP:0005600
";

pub const NODE2TERM: &str = "\
node_id\tterm_id
1\tMP:0000001
2\tMP:0005385
3\tMP:0002127
4\tMP:0000266
5\tMP:0005376
6\tMP:0001544
7\tMP:0004084
8\tMP:0004084
9\tMP:0003137
12\tMP:0005598
13\tMP:0005598
";

pub const BACKTRACE: &str = "\
node_id\tpath
1\t1
2\t1 2
3\t1 2 3
4\t1 2 3 4
5\t1 5
6\t1 2 6
7\t1 2 3 4 7
8\t1 2 6 8
9\t1 2 6 9
12\t1 2 3 4 7 12
13\t1 2 6 8 13
";

pub const FULLPATH: &str = "\
node_id\tchild_node_id\tfullpath
2\t3\t2 3
2\t4\t2 3 4
2\t7\t2 3 4 7
2\t12\t2 3 4 7 12
2\t6\t2 6
2\t8\t2 6 8
2\t13\t2 6 8 13
2\t9\t2 6 9
3\t4\t3 4
3\t7\t3 4 7
3\t12\t3 4 7 12
4\t7\t4 7
4\t12\t4 7 12
6\t8\t6 8
6\t13\t6 8 13
6\t9\t6 9
7\t12\t7 12
8\t13\t8 13
";

pub const SYNONYMS: &str = "\
term_id\tsyn_name
MP:0000266\theart abnormalities
MP:0000266\tabnormal cardiac morphology
MP:0004084\tabnormal heart contractility
";

pub const ALT_IDS: &str = "\
term_id\talt_id
MP:0000266\tMP:0000267
";

pub const MAPPINGS: &str = "\
term_id\tmapped_term_id\tontology
MP:0000266\tMA:0000072\tMA
MP:0000266\tUBERON:0000948\tUBERON
MP:0004084\tMA:0000164\tMA
MP:0004084\tMA:9999999\tMA
";

pub const MA_TERM_INFOS: &str = "\
term_id\tname
MA:0000072\theart
MA:0000164\tcardiac muscle tissue
";

/// Writes every fixture table into `dir`.
pub fn write_fixture(dir: &Path) {
    fs::write(dir.join("terms.tsv"), TERMS).unwrap();
    fs::write(dir.join("node2term.tsv"), NODE2TERM).unwrap();
    fs::write(dir.join("node_backtrace_fullpath.tsv"), BACKTRACE).unwrap();
    fs::write(dir.join("node_subsumption_fullpath_concat.tsv"), FULLPATH).unwrap();
    fs::write(dir.join("synonyms.tsv"), SYNONYMS).unwrap();
    fs::write(dir.join("alt_ids.tsv"), ALT_IDS).unwrap();
    fs::write(dir.join("mappings.tsv"), MAPPINGS).unwrap();
    fs::write(dir.join("ma_term_infos.tsv"), MA_TERM_INFOS).unwrap();
}

/// A temp directory holding the full fixture.
pub fn fixture_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path());
    dir
}

/// Default config pointed at `dir`.
pub fn config_for(dir: &Path) -> Config {
    let mut config = Config::default();
    config.source.data_dir = dir.to_string_lossy().to_string();
    config
}
