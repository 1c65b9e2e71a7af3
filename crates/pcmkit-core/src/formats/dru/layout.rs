/// Line that switches the report into graph mode.
pub const GRAPH_MARKER: &str = "Grafik";
/// Column-header prefixes skipped in the summary section.
pub const SUMMARY_HEADER_PREFIXES: [&str; 2] = ["Test no", "( )"];
/// Column-header prefix skipped in the graph section.
pub const GRAPH_HEADER_PREFIX: &str = "Test no";

pub const COLUMN_SEPARATOR: char = '\t';

pub const SUMMARY_MIN_COLUMNS: usize = 11;
pub const GRAPH_MIN_COLUMNS: usize = 6;

// summary columns
pub const TEST_NO: usize = 0;
pub const TEST_TIPI: usize = 1;
pub const ANMA_CAPI: usize = 2;
pub const SINIFI: usize = 3;
pub const ILK_BOY: usize = 4;
pub const KUTLE: usize = 5;
pub const BIRIM_KUTLE: usize = 6;
pub const AKMA: usize = 7;
pub const CEKME: usize = 8;
pub const CEKME_AKMA: usize = 9;
pub const KOPMA_UZAMASI: usize = 10;

// graph columns
pub const SPECIMEN: usize = 0;
pub const ZAMAN: usize = 1;
pub const KUVVET_N: usize = 2;
pub const CETVEL_MM: usize = 3;
pub const KANAL3: usize = 4;
pub const KANAL4: usize = 5;
