/// Simple Moving Average
pub fn sma(data: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || data.len() < period {
        return vec![];
    }

    let mut result = Vec::with_capacity(data.len() - period + 1);
    for i in period - 1..data.len() {
        let sum: f64 = data[i + 1 - period..=i].iter().sum();
        result.push(sum / period as f64);
    }
    result
}

/// Exponential Moving Average, seeded with the first value (non-adjusted
/// recursive form). One output per input.
pub fn ema(data: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || data.is_empty() {
        return vec![];
    }

    let alpha = 2.0 / (period as f64 + 1.0);
    let mut result = Vec::with_capacity(data.len());
    result.push(data[0]);

    for i in 1..data.len() {
        let ema_val = alpha * data[i] + (1.0 - alpha) * result[i - 1];
        result.push(ema_val);
    }

    result
}

/// Relative Strength Index over a rolling window of simple average gains and
/// losses. A window without losses reads 100.
pub fn rsi(data: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || data.len() <= period {
        return vec![];
    }

    let mut gains = Vec::with_capacity(data.len() - 1);
    let mut losses = Vec::with_capacity(data.len() - 1);

    for i in 1..data.len() {
        let change = data[i] - data[i - 1];
        if change > 0.0 {
            gains.push(change);
            losses.push(0.0);
        } else {
            gains.push(0.0);
            losses.push(change.abs());
        }
    }

    let mut rsi_values = Vec::with_capacity(gains.len() + 1 - period);

    for end in period..=gains.len() {
        let avg_gain = gains[end - period..end].iter().sum::<f64>() / period as f64;
        let avg_loss = losses[end - period..end].iter().sum::<f64>() / period as f64;

        let rsi = if avg_loss == 0.0 {
            100.0
        } else {
            let rs = avg_gain / avg_loss;
            100.0 - (100.0 / (1.0 + rs))
        };
        rsi_values.push(rsi);
    }

    rsi_values
}

/// TRIX (triple-smoothed EMA rate of change) and its signal line
pub struct TrixResult {
    pub trix: Vec<f64>,
    pub signal: Vec<f64>,
}

/// TRIX in percent between consecutive triple-smoothed values, plus an EMA
/// signal line over the TRIX series. Needs `period + 1` closes.
pub fn trix(data: &[f64], period: usize, signal_period: usize) -> TrixResult {
    if period == 0 || signal_period == 0 || data.len() <= period {
        return TrixResult { trix: vec![], signal: vec![] };
    }

    let triple = ema(&ema(&ema(data, period), period), period);

    let trix: Vec<f64> = triple
        .windows(2)
        .map(|w| (w[1] - w[0]) / w[0] * 100.0)
        .collect();

    let signal = if trix.len() >= signal_period {
        ema(&trix, signal_period)
    } else {
        vec![]
    };

    TrixResult { trix, signal }
}

