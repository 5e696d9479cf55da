//! Parser Module
//!
//! calamineを使用したスプレッドシート解析。
//! ワークブックを`TabularSource`として公開します。

mod workbook;

pub use workbook::WorkbookParser;
