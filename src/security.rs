//! Security Module
//!
//! 入力ファイルの読み込みに対する制限を定義するモジュール。
//! ワークブックはメモリ上に一括で読み込むため、入力サイズに上限を設けます。

use std::io::Read;

use crate::error::SubjectsError;

/// セキュリティ設定
///
/// ファイル処理時のセキュリティ制限を定義します。
#[derive(Debug, Clone)]
pub(crate) struct SecurityConfig {
    /// 入力ファイルの最大サイズ（バイト）
    /// デフォルト: 256MB (268_435_456 bytes)
    pub max_input_file_size: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_input_file_size: 268_435_456, // 256MB
        }
    }
}

impl SecurityConfig {
    /// 入力全体を読み込み、サイズ上限を検証する
    ///
    /// 上限+1バイトまでしか読み込まないため、巨大な入力でもメモリを使い切りません。
    ///
    /// # 戻り値
    ///
    /// * `Ok(Vec<u8>)` - 上限以内の入力データ
    /// * `Err(SubjectsError::SecurityViolation)` - 上限を超えた場合
    /// * `Err(SubjectsError::Io)` - 読み込みに失敗した場合
    pub fn read_limited<R: Read>(&self, reader: R) -> Result<Vec<u8>, SubjectsError> {
        let mut buffer = Vec::new();
        let bytes_read = reader
            .take(self.max_input_file_size.saturating_add(1))
            .read_to_end(&mut buffer)?;

        if bytes_read as u64 > self.max_input_file_size {
            return Err(SubjectsError::SecurityViolation(format!(
                "Input file size exceeds maximum: more than {} bytes",
                self.max_input_file_size
            )));
        }

        Ok(buffer)
    }
}
