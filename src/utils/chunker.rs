//! 消息分段
//!
//! 把任意长度的文本切成不超过 `max_chars` 个字符的片段，优先在段落边界（空行）处切分。
//! 所有片段按顺序拼接后与原文完全一致。

/// 段落边界
pub const PARAGRAPH_BREAK: &str = "\n\n";

/// 按字符数切分文本
///
/// - 找到窗口内最后一个 `"\n\n"`，在其之前切分，下一段从该边界开始
/// - 窗口内没有边界时按 `max_chars` 硬切，不会切断单个字符
/// - 空文本返回空列表，`max_chars` 为 0 时按 1 处理
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut rest = text;

    // 剩余文本超过 max_chars 个字符时，第 max_chars 个字符的字节偏移就是窗口末尾
    while let Some((limit, _)) = rest.char_indices().nth(max_chars) {
        let split = match rest[..limit].rfind(PARAGRAPH_BREAK) {
            // 边界在开头时切出的片段为空，改为硬切
            Some(pos) if pos > 0 => pos,
            _ => limit,
        };
        chunks.push(rest[..split].to_string());
        rest = &rest[split..];
    }

    if !rest.is_empty() {
        chunks.push(rest.to_string());
    }

    chunks
}
