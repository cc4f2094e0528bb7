//! 리포트 경로 정규화
//!
//! Dependency-Check는 아카이브 내부 항목 등을 표현할 때 경로에 `?` 자리표시자를
//! 넣습니다. 소스 인덱스에서 조회하기 전에 이를 실제 경로 구분자로 되돌립니다.
//!
//! 구분자는 원래 경로에 `/`가 하나라도 있으면 `/`, 없으면 `\`입니다.
//! 그 외 예약 문자는 그대로 둡니다.

/// 예약 문자 하나를 어떻게 다룰지
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escape {
    /// 그대로 유지
    Keep,
    /// 문맥상의 경로 구분자로 치환
    Separator,
}

/// 예약 문자 치환 표
pub const RESERVED_CHARS: [(char, Escape); 9] = [
    ('<', Escape::Keep),
    ('>', Escape::Keep),
    (':', Escape::Keep),
    ('"', Escape::Keep),
    ('/', Escape::Keep),
    ('\\', Escape::Keep),
    ('|', Escape::Keep),
    ('?', Escape::Separator),
    ('*', Escape::Keep),
];

/// 예약 문자에 대한 처리 방식을 찾습니다. 예약 문자가 아니면 `None`
pub fn escape_for(c: char) -> Option<Escape> {
    RESERVED_CHARS
        .iter()
        .find(|(reserved, _)| *reserved == c)
        .map(|(_, escape)| *escape)
}

/// 경로 표기 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStyle {
    /// `/` 구분
    Unix,
    /// `\` 구분
    Windows,
}

impl PathStyle {
    /// 경로 문자열에서 표기 방식을 추정합니다.
    pub fn detect(path: &str) -> Self {
        if path.contains('/') {
            Self::Unix
        } else {
            Self::Windows
        }
    }

    /// 구분자 문자
    pub fn separator(&self) -> char {
        match self {
            Self::Unix => '/',
            Self::Windows => '\\',
        }
    }
}

/// 리포트 경로를 소스 인덱스 조회용으로 정규화합니다.
///
/// 한 번만 훑는 순수 함수입니다. 예약 문자가 아닌 글자는 그대로 복사됩니다.
pub fn normalize(path: &str) -> String {
    let separator = PathStyle::detect(path).separator();
    path.chars()
        .map(|c| match escape_for(c) {
            Some(Escape::Separator) => separator,
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_becomes_forward_slash_in_unix_path() {
        assert_eq!(normalize("/home/u/app?lib/a.jar"), "/home/u/app/lib/a.jar");
    }

    #[test]
    fn placeholder_becomes_backslash_in_windows_path() {
        assert_eq!(normalize(r"C:\proj?lib\a.jar"), r"C:\proj\lib\a.jar");
    }

    #[test]
    fn path_without_reserved_chars_is_unchanged() {
        let path = "/opt/app/lib/commons-io-2.6.jar";
        assert_eq!(normalize(path), path);
    }

    #[test]
    fn other_reserved_chars_are_kept() {
        assert_eq!(normalize("/a/b:c*d|e\"f<g>h"), "/a/b:c*d|e\"f<g>h");
    }

    #[test]
    fn placeholder_only_path_uses_backslash() {
        assert_eq!(normalize("a?b?c"), r"a\b\c");
    }

    #[test]
    fn empty_path() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn normalize_is_idempotent_for_unix_paths() {
        let once = normalize("/x?y?z.jar");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn escape_table_lookup() {
        assert_eq!(escape_for('?'), Some(Escape::Separator));
        assert_eq!(escape_for('*'), Some(Escape::Keep));
        assert_eq!(escape_for('a'), None);
        assert_eq!(RESERVED_CHARS.len(), 9);
    }

    #[test]
    fn style_detection() {
        assert_eq!(PathStyle::detect("a/b"), PathStyle::Unix);
        assert_eq!(PathStyle::detect(r"a\b"), PathStyle::Windows);
        assert_eq!(PathStyle::detect("ab"), PathStyle::Windows);
    }
}
