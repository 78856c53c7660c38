pub(crate) mod gtdb;
pub(crate) mod json;
pub(crate) mod ncbi;
pub(crate) mod newick;

/// Split one `nodes.dmp`/`names.dmp` record on NCBI's `"\t|\t"` field
/// separator, stripping the trailing `"\t|"` record terminator that
/// survives on the last field once the line's own `\n` has been trimmed.
pub(crate) fn split_dmp_fields(line: &str) -> Vec<String> {
    let line = line.strip_suffix("\t|").unwrap_or(line);
    line.split("\t|\t").map(|f| f.trim().to_string()).collect()
}
