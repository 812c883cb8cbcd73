// args.rs - Command line arguments definition

use argh::FromArgs;

pub const DEFAULT_OUTPUT_DIR: &str = "./STRprofiler";
pub const DEFAULT_SAMPLE_COL: &str = "Sample";
pub const DEFAULT_MARKER_COL: &str = "Marker";

#[derive(FromArgs)]
/// strprofiler - Compare STR profiles for identity, relatedness and sample mixing
pub struct Args {
    /// tanabe score threshold for reporting matches (default: 80)
    #[argh(option, short = 't', default = "80.0")]
    pub tan_threshold: f64,

    /// masters (vs. query) score threshold for reporting matches (default: 80)
    #[argh(option, default = "80.0")]
    pub mas_q_threshold: f64,

    /// masters (vs. reference) score threshold for reporting matches (default: 80)
    #[argh(option, default = "80.0")]
    pub mas_r_threshold: f64,

    /// number of markers with >2 alleles allowed before a sample is flagged as mixed (default: 3)
    #[argh(option, short = 'm', default = "3")]
    pub mix_threshold: usize,

    /// headerless CSV mapping old sample names (first column) to new ones (second column)
    #[argh(option, short = 's')]
    pub sample_map: Option<String>,

    /// name of the amelogenin column in the STR file(s) (default: AMEL)
    #[argh(option, default = "String::from(\"AMEL\")")]
    pub amel_col: String,

    /// name of the sample column in the STR file(s) (default: Sample)
    #[argh(option, default = "String::from(\"Sample\")")]
    pub sample_col: String,

    /// name of the marker column in wide-layout STR file(s) (default: Marker)
    #[argh(option, default = "String::from(\"Marker\")")]
    pub marker_col: String,

    /// fold PentaD/PentaE alias spellings into one marker name: true or false (default: true)
    #[argh(option)]
    pub penta_fix: Option<bool>,

    /// use amelogenin for similarity scoring
    #[argh(switch)]
    pub score_amel: bool,

    /// output directory (default: ./STRprofiler)
    #[argh(option, short = 'o', default = "String::from(\"./STRprofiler\")")]
    pub output_dir: String,

    /// number of threads (default: auto-detect)
    #[argh(option)]
    pub threads: Option<usize>,

    /// load and canonicalize inputs, report cohort statistics, write nothing
    #[argh(switch)]
    pub dry_run: bool,

    /// path to TOML configuration file
    #[argh(option)]
    pub config: Option<String>,

    /// generate sample configuration file and exit
    #[argh(switch)]
    pub generate_config: bool,

    /// STR profile files (.csv, .tsv or .txt)
    #[argh(positional)]
    pub input_files: Vec<String>,
}
