// API endpoint
pub const DEFAULT_API_BASE_URL: &str = "https://api.vibeguard.ai";
pub const STATS_PATH: &str = "/api/stats";
pub const GLOBAL_PATH: &str = "/api/global";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

// Polling (in seconds)
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;
pub const MIN_POLL_INTERVAL_SECS: u64 = 1;

// Counter animation durations (in milliseconds)
pub const SCANS_ANIMATION_MS: u64 = 2_400;
pub const WALLETS_ANIMATION_MS: u64 = 2_000;
pub const PREVENTED_ANIMATION_MS: u64 = 2_200;
pub const ACTIVE_ANIMATION_MS: u64 = 1_800;
pub const BNB_PRICE_ANIMATION_MS: u64 = 1_800;

// Redraw
pub const DEFAULT_FRAME_RATE_FPS: u32 = 30;
pub const MAX_FRAME_RATE_FPS: u32 = 120;

// Particle field (cosmetic)
pub const DEFAULT_PARTICLE_COUNT: usize = 48;
pub const PARTICLE_MIN_SPEED: f64 = 0.6; // rows per second
pub const PARTICLE_MAX_SPEED: f64 = 2.2;
pub const PARTICLE_GLYPHS: [char; 3] = ['·', '•', '∙'];

// Currency abbreviation thresholds
pub const MILLION: f64 = 1_000_000.0;
pub const THOUSAND: f64 = 1_000.0;

// Logging
pub const DEFAULT_LOG_FILE: &str = "vibeguard.log";

// Branding
pub const PRODUCT_NAME: &str = "VibeGuard AI";
pub const PRODUCT_TAGLINE: &str = "Neural Security Sentinel • opBNB Mainnet";
pub const CTA_LABEL: &str = "SHIELD MY WALLET NOW";
pub const CTA_NOTICE: &str = "WalletConnect coming soon in Mobile App 🚀";
pub const FOOTER_TEXT: &str = "Powered by Gemini 2.0 + Grok 4 • Protected by opBNB";

// Scan growth seed (last 7 days)
pub const SEED_GROWTH: [(&str, u64); 7] = [
    ("Feb 15", 1_240),
    ("Feb 16", 2_890),
    ("Feb 17", 4_520),
    ("Feb 18", 6_710),
    ("Feb 19", 8_430),
    ("Feb 20", 10_200),
    ("Feb 21", 12_450),
];

// Recent scans seed: (minutes ago, contract, score)
pub const SEED_RECENT_SCANS: [(i64, &str, u8); 3] = [
    (2, "0x8f3...a1b2", 92),
    (7, "0x4d9...c3e4", 12),
    (14, "0x2a7...f93", 98),
];

// 이 점수 미만이면 드레이너로 분류
pub const DRAINER_SCORE_THRESHOLD: u8 = 50;
