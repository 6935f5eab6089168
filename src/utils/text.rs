//! 混合文本宽度计算
//!
//! 汉字按 2 个单位计算，其他字符按 1 个单位计算。输入框的实时截断、
//! 提交时的截断以及托盘菜单标签都必须使用这里的函数，保证"放得下"的判断一致。

/// 截断后追加的省略号
pub const ELLIPSIS: char = '…';

/// 判断字符是否属于 Unicode Han 文字
pub fn is_han(c: char) -> bool {
    matches!(
        c as u32,
        0x2E80..=0x2E99
            | 0x2E9B..=0x2EF3
            | 0x2F00..=0x2FD5
            | 0x3005
            | 0x3007
            | 0x3021..=0x3029
            | 0x3038..=0x303B
            | 0x3400..=0x4DBF
            | 0x4E00..=0x9FFF
            | 0xF900..=0xFA6D
            | 0xFA70..=0xFAD9
            | 0x16FE2..=0x16FE3
            | 0x16FF0..=0x16FF1
            | 0x20000..=0x2A6DF
            | 0x2A700..=0x2B739
            | 0x2B740..=0x2B81D
            | 0x2B820..=0x2CEA1
            | 0x2CEB0..=0x2EBE0
            | 0x2EBF0..=0x2EE5D
            | 0x2F800..=0x2FA1D
            | 0x30000..=0x3134A
            | 0x31350..=0x323AF
    )
}

/// 单个字符的宽度
#[inline]
pub fn char_weight(c: char) -> usize {
    if is_han(c) {
        2
    } else {
        1
    }
}

/// 计算字符串的混合宽度
pub fn weight(s: &str) -> usize {
    s.chars().map(char_weight).sum()
}

/// 按宽度截断，不追加省略号
///
/// 逐字符累加宽度，遇到会超出 `max_weight` 的字符即停止。
/// 宽字符不会被拆开：剩余预算不足时整个字符被丢弃。
pub fn truncate(s: &str, max_weight: usize) -> &str {
    let mut current = 0;
    for (idx, c) in s.char_indices() {
        let w = char_weight(c);
        if current + w > max_weight {
            return &s[..idx];
        }
        current += w;
    }
    s
}

/// 按宽度截断，被截断时追加省略号
///
/// 原字符串放得下时原样返回；省略号本身不计入 `max_weight`。
pub fn truncate_with_ellipsis(s: &str, max_weight: usize) -> String {
    if weight(s) <= max_weight {
        return s.to_string();
    }
    let mut out = truncate(s, max_weight).to_string();
    out.push(ELLIPSIS);
    out
}

/// 剩余可输入宽度
pub fn remaining(s: &str, max_weight: usize) -> usize {
    max_weight.saturating_sub(weight(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "",
        "buy milk",
        "买牛奶",
        "周五 review PR",
        "一二三四五六七八九十一二三四五六七八九十一",
        "abcdefghijklmnopqrstuvwxyzabcdefghijklmnopqrstuvwxyz",
        "〇々𠀀 mixed ✓ emoji 🥛",
    ];

    #[test]
    fn test_weight_counts_han_double() {
        assert_eq!(weight(""), 0);
        assert_eq!(weight("abc"), 3);
        assert_eq!(weight("买牛奶"), 6);
        assert_eq!(weight("周五 review"), 2 + 2 + 1 + 6);
        // 全角标点和假名不是汉字
        assert_eq!(weight("，ア"), 2);
        // 扩展 B 区汉字
        assert_eq!(weight("𠀀"), 2);
    }

    #[test]
    fn test_weight_matches_char_classification() {
        for s in SAMPLES {
            let han = s.chars().filter(|c| is_han(*c)).count();
            let other = s.chars().count() - han;
            assert_eq!(weight(s), 2 * han + other, "sample {s:?}");
        }
    }

    #[test]
    fn test_truncate_respects_budget_and_is_idempotent() {
        for s in SAMPLES {
            for max in 0..=45 {
                let t = truncate(s, max);
                assert!(weight(t) <= max, "sample {s:?} max {max}");
                assert_eq!(truncate(t, max), t);
                assert!(s.starts_with(t));
            }
        }
    }

    #[test]
    fn test_truncate_never_splits_wide_char() {
        // 预算只剩 1 时汉字被整体丢弃
        assert_eq!(truncate("a买b", 2), "a");
        assert_eq!(truncate("买", 1), "");
        assert_eq!(truncate("买牛奶", 5), "买牛");
    }

    #[test]
    fn test_truncate_with_ellipsis_keeps_fitting_text() {
        assert_eq!(truncate_with_ellipsis("buy milk", 8), "buy milk");
        assert_eq!(truncate_with_ellipsis("买牛奶", 6), "买牛奶");
        assert_eq!(truncate_with_ellipsis("", 0), "");
    }

    #[test]
    fn test_truncate_with_ellipsis_marks_overflow() {
        for s in SAMPLES {
            for max in 0..=45 {
                if weight(s) <= max {
                    continue;
                }
                let t = truncate_with_ellipsis(s, max);
                let prefix = t.strip_suffix(ELLIPSIS).expect("ellipsis appended");
                assert!(weight(prefix) <= max);
            }
        }
        assert_eq!(truncate_with_ellipsis("buy milk", 3), "buy…");
        assert_eq!(truncate_with_ellipsis("买牛奶", 5), "买牛…");
    }

    #[test]
    fn test_remaining_saturates() {
        assert_eq!(remaining("abc", 40), 37);
        assert_eq!(remaining("买牛奶", 40), 34);
        assert_eq!(remaining("abcdef", 4), 0);
    }
}
