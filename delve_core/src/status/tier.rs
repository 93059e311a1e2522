//! Severity tiers for Stun and Cut

/// Stun severity: 0 none, 1 stunned, 2 heavy stun, 3 knocked out
pub fn stun_tier(v: i32) -> u8 {
    match v {
        i32::MIN..=0 => 0,
        1..=50 => 1,
        51..=100 => 2,
        _ => 3,
    }
}

/// Cut severity: 0 none up to 7 mortal wound
pub fn cut_tier(v: i32) -> u8 {
    match v {
        i32::MIN..=0 => 0,
        1..=10 => 1,
        11..=25 => 2,
        26..=50 => 3,
        51..=100 => 4,
        101..=200 => 5,
        201..=1000 => 6,
        _ => 7,
    }
}

pub(crate) fn stun_message(tier: u8) -> &'static str {
    match tier {
        1 => "You have been stunned.",
        2 => "You have been heavily stunned.",
        _ => "You have been knocked out.",
    }
}

pub(crate) fn cut_message(tier: u8) -> &'static str {
    match tier {
        1 => "You have been given a graze.",
        2 => "You have been given a light cut.",
        3 => "You have been given a bad cut.",
        4 => "You have been given a nasty cut.",
        5 => "You have been given a severe cut.",
        6 => "You have been given a deep gash.",
        _ => "You have been given a mortal wound.",
    }
}

/// HP lost per tick while bleeding at a tier
pub fn cut_bleed(tier: u8) -> i32 {
    match tier {
        0 => 0,
        1 => 1,
        2 => 3,
        3 => 7,
        4 => 16,
        5 => 32,
        6 => 80,
        _ => 200,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stun_bands() {
        let v = [0, 1, 50, 51, 100, 101, 10_000];
        let t: Vec<u8> = v.iter().map(|&x| stun_tier(x)).collect();
        assert_eq!(t, vec![0, 1, 1, 2, 2, 3, 3]);
    }

    #[test]
    fn test_cut_bands() {
        let v = [0, 5, 15, 30, 60, 150, 250, 1500];
        let t: Vec<u8> = v.iter().map(|&x| cut_tier(x)).collect();
        assert_eq!(t, vec![0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(cut_tier(10), 1);
        assert_eq!(cut_tier(11), 2);
        assert_eq!(cut_tier(1000), 6);
        assert_eq!(cut_tier(1001), 7);
    }

    #[test]
    fn test_bleed_grows_with_tier() {
        for t in 1..7u8 {
            assert!(cut_bleed(t) < cut_bleed(t + 1));
        }
    }
}
