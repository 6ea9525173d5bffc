mod tests {
    use std::cell::RefCell;
    use std::convert::Infallible;
    use std::rc::Rc;

    use embedded_hal::delay::DelayNs;
    use embedded_hal::digital::{ErrorType, OutputPin};
    use gravity_hoop::OutputDriver;
    use gravity_hoop::color::Rgb;
    use gravity_hoop::config::N_LEDS;
    use gravity_hoop::frame::Frame;
    use gravity_hoop::ws2812::{
        BIT_PERIOD_NS, LATCH_US, ONE_HIGH_NS, Ws2812, ZERO_HIGH_NS, high_time_ns,
    };

    /// Line level changes on a virtual clock
    #[derive(Default)]
    struct Line {
        now_ns: u64,
        high: bool,
        /// `(time, new level)` for every real level change
        edges: Vec<(u64, bool)>,
    }

    impl Line {
        fn set(&mut self, high: bool) {
            if self.high != high {
                self.high = high;
                self.edges.push((self.now_ns, high));
            }
        }
    }

    struct Pin(Rc<RefCell<Line>>);

    impl ErrorType for Pin {
        type Error = Infallible;
    }

    impl OutputPin for Pin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.0.borrow_mut().set(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.0.borrow_mut().set(true);
            Ok(())
        }
    }

    struct Delay(Rc<RefCell<Line>>);

    impl DelayNs for Delay {
        fn delay_ns(&mut self, ns: u32) {
            self.0.borrow_mut().now_ns += u64::from(ns);
        }
    }

    /// One transmitted bit: high time and rise-to-rise period
    struct Pulse {
        high_ns: u64,
        /// `None` for the last bit of a transmission
        period_ns: Option<u64>,
    }

    fn strip() -> (Ws2812<Pin, Delay>, Rc<RefCell<Line>>) {
        let line = Rc::new(RefCell::new(Line::default()));
        let driver = Ws2812::new(Pin(line.clone()), Delay(line.clone())).unwrap();
        (driver, line)
    }

    fn pulses(line: &Line) -> Vec<Pulse> {
        let rises: Vec<u64> = line.edges.iter().filter(|e| e.1).map(|e| e.0).collect();
        let falls: Vec<u64> = line.edges.iter().filter(|e| !e.1).map(|e| e.0).collect();
        assert_eq!(rises.len(), falls.len());
        rises
            .iter()
            .zip(&falls)
            .enumerate()
            .map(|(i, (&rise, &fall))| Pulse {
                high_ns: fall - rise,
                period_ns: rises.get(i + 1).map(|next| next - rise),
            })
            .collect()
    }

    fn decode(pulses: &[Pulse]) -> Vec<u8> {
        pulses
            .chunks(8)
            .map(|bits| {
                bits.iter().fold(0u8, |byte, pulse| {
                    (byte << 1) | u8::from(pulse.high_ns == u64::from(ONE_HIGH_NS))
                })
            })
            .collect()
    }

    #[test]
    fn test_pulse_widths() {
        assert_eq!(high_time_ns(false), ZERO_HIGH_NS);
        assert_eq!(high_time_ns(true), ONE_HIGH_NS);
        // 30-40% for a zero, 60-70% for a one
        assert!(ZERO_HIGH_NS * 100 >= BIT_PERIOD_NS * 30);
        assert!(ZERO_HIGH_NS * 100 <= BIT_PERIOD_NS * 40);
        assert!(ONE_HIGH_NS * 100 >= BIT_PERIOD_NS * 60);
        assert!(ONE_HIGH_NS * 100 <= BIT_PERIOD_NS * 70);
        assert!(LATCH_US >= 50);
    }

    #[test]
    fn test_dark_frame() {
        let (mut driver, line) = strip();
        let frame = Frame::new();
        driver.write(&frame).unwrap();

        let line = line.borrow();
        let pulses = pulses(&line);
        assert_eq!(pulses.len(), N_LEDS * 24);
        assert!(pulses.iter().all(|p| p.high_ns == u64::from(ZERO_HIGH_NS)));
        assert!(decode(&pulses).iter().all(|&byte| byte == 0));
    }

    #[test]
    fn test_bit_period_is_constant() {
        let (mut driver, line) = strip();
        let mut frame = Frame::with_color(Rgb {
            r: 0xA5,
            g: 0x0F,
            b: 0xF0,
        });
        frame.mark_led(0);
        frame.mark_led(7);
        driver.write(&frame).unwrap();

        let line = line.borrow();
        let pulses = pulses(&line);
        let (last, rest) = pulses.split_last().unwrap();
        for pulse in rest {
            assert_eq!(pulse.period_ns, Some(u64::from(BIT_PERIOD_NS)));
        }
        assert_eq!(last.period_ns, None);
    }

    #[test]
    fn test_lit_leds_carry_color_in_wire_order() {
        let (mut driver, line) = strip();
        let mut frame = Frame::with_color(Rgb {
            r: 0x12,
            g: 0x34,
            b: 0x56,
        });
        frame.mark_led(1);
        frame.mark_led(N_LEDS - 1);
        driver.write(&frame).unwrap();

        let line = line.borrow();
        let bytes = decode(&pulses(&line));
        assert_eq!(bytes.len(), N_LEDS * 3);
        for (led, grb) in bytes.chunks(3).enumerate() {
            if led == 1 || led == N_LEDS - 1 {
                assert_eq!(grb, [0x34, 0x12, 0x56], "led {led}");
            } else {
                assert_eq!(grb, [0, 0, 0], "led {led}");
            }
        }
    }

    #[test]
    fn test_latch_after_frame() {
        let (mut driver, line) = strip();
        let mut frame = Frame::new();
        frame.mark_led(N_LEDS - 1);
        driver.write(&frame).unwrap();

        let line = line.borrow();
        let last_fall = line.edges.last().unwrap();
        assert!(!last_fall.1);
        assert!(!line.high);
        assert!(line.now_ns - last_fall.0 >= u64::from(LATCH_US) * 1000);
    }

    #[test]
    fn test_frames_back_to_back() {
        let (mut driver, line) = strip();
        let frame = Frame::new();
        driver.write(&frame).unwrap();
        let end_of_first = line.borrow().now_ns;
        let edges_in_first = line.borrow().edges.len();
        driver.write(&frame).unwrap();

        let line = line.borrow();
        let first_rise_of_second = line.edges[edges_in_first].0;
        assert!(first_rise_of_second >= end_of_first);
        assert_eq!(line.edges.len(), edges_in_first * 2);
    }
}
