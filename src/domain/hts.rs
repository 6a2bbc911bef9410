// ==========================================
// HTS 关税计算系统 - HTS 编码规范化
// ==========================================
// 职责: HTS 编码 clean 形式（纯数字，用作关联键）与展示形式互转
// 红线: clean 形式是唯一关联键，展示形式只派生、不落表
// ==========================================

/// 将任意输入转换为 clean 形式：去掉所有 `.` 与空白字符
///
/// 不做任何校验，永不失败。
///
/// # 示例
/// ```
/// use hts_tariff::domain::hts::clean;
/// assert_eq!(clean(" 7208.51.0030 "), "7208510030");
/// ```
pub fn clean(code: &str) -> String {
    code.chars()
        .filter(|c| *c != '.' && !c.is_whitespace())
        .collect()
}

/// 将 clean 编码渲染为展示形式
///
/// - 长度 > 10: `xxxx.xx.xx.rest`
/// - 其他: `xxxx.xx.rest`
///
/// 位数不足时按字符截取，得到的展示串可能不规范，但不会 panic。
pub fn to_display(clean_code: &str) -> String {
    let code = clean(clean_code);
    let chars: Vec<char> = code.chars().collect();

    let segment = |from: usize, to: Option<usize>| -> String {
        let start = from.min(chars.len());
        let end = to.map_or(chars.len(), |t| t.min(chars.len()));
        chars[start..end].iter().collect()
    };

    if chars.len() > 10 {
        format!(
            "{}.{}.{}.{}",
            segment(0, Some(4)),
            segment(4, Some(6)),
            segment(6, Some(8)),
            segment(8, None)
        )
    } else {
        format!(
            "{}.{}.{}",
            segment(0, Some(4)),
            segment(4, Some(6)),
            segment(6, None)
        )
    }
}
