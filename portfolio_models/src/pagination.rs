use nutype::nutype;

/// Window into an ordered result set, as handed to the persistence layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaginationSlice {
    pub limit: PaginationLimit,
    pub offset: u64,
}

#[nutype(
    validate(greater_or_equal = PaginationLimit::MIN, less_or_equal = PaginationLimit::MAX),
    derive(Debug, Clone, Copy, PartialEq, Eq, Deref, TryFrom, Serialize, Deserialize)
)]
pub struct PaginationLimit(u64);

impl PaginationLimit {
    pub const MIN: u64 = 1;
    pub const MAX: u64 = 100;
    pub const DEFAULT: u64 = 10;

    /// Clamps an arbitrary requested limit into the allowed range.
    pub fn clamped(limit: i64) -> Self {
        let limit = limit.clamp(Self::MIN as i64, Self::MAX as i64) as u64;
        Self::try_new(limit).unwrap_or_default()
    }
}

impl Default for PaginationLimit {
    fn default() -> Self {
        Self::try_new(Self::DEFAULT).unwrap()
    }
}

#[nutype(
    validate(greater_or_equal = 1),
    derive(Debug, Clone, Copy, PartialEq, Eq, Deref, TryFrom, Serialize, Deserialize)
)]
pub struct PageNumber(u64);

impl PageNumber {
    pub fn first() -> Self {
        Self::try_new(1).unwrap()
    }

    /// Any page below the first one is treated as the first page.
    pub fn at_least_first(page: i64) -> Self {
        u64::try_from(page)
            .ok()
            .and_then(|page| Self::try_new(page).ok())
            .unwrap_or_else(Self::first)
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::first()
    }
}

/// A 1-based page of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageRequest {
    pub page: PageNumber,
    pub limit: PaginationLimit,
}

impl PageRequest {
    /// Builds a page request from raw query string values.
    ///
    /// Malformed values are never rejected: anything that does not start
    /// with an integer falls back to the defaults, and the result is clamped
    /// into the allowed ranges.
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Self {
        let page = page
            .and_then(parse_int_prefix)
            .map(PageNumber::at_least_first)
            .unwrap_or_default();
        let limit = limit
            .and_then(parse_int_prefix)
            .map(PaginationLimit::clamped)
            .unwrap_or_default();
        Self { page, limit }
    }

    /// Number of records preceding this page.
    pub fn skip(&self) -> u64 {
        (*self.page - 1).saturating_mul(*self.limit)
    }

    pub fn slice(&self) -> PaginationSlice {
        PaginationSlice {
            limit: self.limit,
            offset: self.skip(),
        }
    }
}

/// Describes where a page sits within the complete listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMeta {
    pub page: PageNumber,
    pub limit: PaginationLimit,
    pub total: u64,
    pub total_pages: u64,
}

impl PageMeta {
    pub fn new(request: PageRequest, total: u64) -> Self {
        Self {
            page: request.page,
            limit: request.limit,
            total,
            total_pages: total.div_ceil(*request.limit),
        }
    }
}

/// Parses the leading integer of `input` the way lenient form parsers do:
/// leading whitespace and a single sign are accepted, parsing stops at the
/// first non-digit, and `None` is returned if no digit was found.
/// Values outside the `i64` range saturate.
pub fn parse_int_prefix(input: &str) -> Option<i64> {
    let input = input.trim_start();
    let (negative, digits) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    let digits = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .map(|b| i64::from(b - b'0'));

    let mut seen = false;
    let mut value = 0i64;
    for digit in digits {
        seen = true;
        value = value.saturating_mul(10);
        value = if negative {
            value.saturating_sub(digit)
        } else {
            value.saturating_add(digit)
        };
    }

    seen.then_some(value)
}
