#![no_main]

use libfuzzer_sys::fuzz_target;
use replay::{MapLog, PlayerEventKind, PlayerLog, ReplayLimits, SplatLog, Team};

fuzz_target!(|data: &[u8]| {
    let Some((&params, log)) = data.split_first() else {
        return;
    };
    let limits = ReplayLimits::for_testing();
    let width = u32::from(params % 64) + 1;
    let height = u32::from(params / 4 % 64) + 1;
    let team = match params % 3 {
        0 => None,
        1 => Some(Team::Red),
        _ => Some(Team::Blue),
    };

    // Bounded takes: tallies and footers can describe very long runs.
    if let Ok(player) = PlayerLog::with_limits(log, team, 1 << 20, &limits) {
        let mut last_time = 0;
        for event in player.events().take(100_000) {
            assert!(event.time >= last_time);
            last_time = event.time;
            if event.kind == PlayerEventKind::End {
                break;
            }
        }
    }

    if let Ok(map) = MapLog::with_limits(log, width, &limits) {
        let _ = map.events().take(100_000).count();
        let _ = map.grid();
    }

    if let Ok(splats) = SplatLog::with_limits(log, width, height, &limits) {
        let _ = splats.events().take(10_000).count();
    }
});
