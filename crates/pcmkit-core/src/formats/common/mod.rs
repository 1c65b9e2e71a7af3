pub(crate) mod codepage;
