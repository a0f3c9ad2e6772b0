/// 练习倒计时
///
/// 总时长为 `max(1, 分钟) * 60` 秒，每次 `tick` 走一秒
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PracticeTimer {
    total_seconds: u32,
    remaining_seconds: u32,
    running: bool,
}

impl PracticeTimer {
    /// 创建一个暂停状态的计时器
    pub fn new(duration_minutes: u32) -> Self {
        let total_seconds = duration_minutes.max(1).saturating_mul(60);
        Self {
            total_seconds,
            remaining_seconds: total_seconds,
            running: false,
        }
    }

    /// 开始 / 暂停
    ///
    /// 时间已经走完时再次开始会重新装满
    pub fn toggle(&mut self) {
        if self.running {
            self.running = false;
            return;
        }
        if self.remaining_seconds == 0 {
            self.remaining_seconds = self.total_seconds;
        }
        self.running = true;
    }

    /// 走一秒；倒数到 0 后停止
    pub fn tick(&mut self) {
        if !self.running {
            return;
        }
        if self.remaining_seconds > 0 {
            self.remaining_seconds -= 1;
        } else {
            self.running = false;
        }
    }

    /// 停止计时
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn total_seconds(&self) -> u32 {
        self.total_seconds
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// 已用秒数
    pub fn used_seconds(&self) -> u32 {
        self.total_seconds.saturating_sub(self.remaining_seconds)
    }

    /// 剩余时间，格式 `MM:SS`
    pub fn formatted_remaining(&self) -> String {
        format_mm_ss(self.remaining_seconds)
    }
}

/// 把秒数格式化为 `MM:SS`
pub fn format_mm_ss(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_minutes_is_clamped_to_one() {
        let timer = PracticeTimer::new(0);
        assert_eq!(timer.total_seconds(), 60);
        assert_eq!(timer.formatted_remaining(), "01:00");
    }

    #[test]
    fn test_tick_only_while_running() {
        let mut timer = PracticeTimer::new(1);
        timer.tick();
        assert_eq!(timer.used_seconds(), 0);

        timer.toggle();
        for _ in 0..15 {
            timer.tick();
        }
        assert_eq!(timer.used_seconds(), 15);
        assert_eq!(timer.formatted_remaining(), "00:45");

        timer.toggle();
        assert!(!timer.is_running());
        timer.tick();
        assert_eq!(timer.used_seconds(), 15);
    }

    #[test]
    fn test_stops_at_zero_and_refills_on_restart() {
        let mut timer = PracticeTimer::new(1);
        timer.toggle();
        for _ in 0..60 {
            timer.tick();
        }
        assert_eq!(timer.remaining_seconds(), 0);
        assert!(timer.is_running());

        // 倒数到 0 之后的下一次 tick 停止计时
        timer.tick();
        assert!(!timer.is_running());
        assert_eq!(timer.used_seconds(), 60);

        timer.toggle();
        assert!(timer.is_running());
        assert_eq!(timer.remaining_seconds(), 60);
    }

    #[test]
    fn test_format_mm_ss() {
        assert_eq!(format_mm_ss(0), "00:00");
        assert_eq!(format_mm_ss(240), "04:00");
        assert_eq!(format_mm_ss(3599), "59:59");
        assert_eq!(format_mm_ss(6000), "100:00");
    }
}
